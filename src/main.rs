fn main() -> miette::Result<()> {
    valprint::cli::run()
}
