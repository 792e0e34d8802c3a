fn main() -> anyhow::Result<()> {
    formsmith::cli::main()
}
