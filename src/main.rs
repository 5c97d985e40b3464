use anyhow::Result;

fn main() -> Result<()> {
    transcript_viewer::cli::run()
}
