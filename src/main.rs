fn main() -> Result<(), Box<dyn std::error::Error>> {
    gpteng_client::cli::main()
}
