fn main() -> anyhow::Result<()> {
    event_resolver::main()
}
