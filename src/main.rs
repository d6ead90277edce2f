fn main() -> anyhow::Result<()> {
    mentonlang::run()
}
