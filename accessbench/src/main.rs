fn main() -> anyhow::Result<()> {
    accessbench_cli::run()
}
