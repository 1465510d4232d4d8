use structopt::StructOpt;

use bin2c_embed as bin2c;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(parse(from_os_str))]
    path_in: std::path::PathBuf,
}

fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();

    if bin2c::identifier(&opt.path_in.to_string_lossy()).is_empty() {
        eprintln!("warning: empty identifier derived from {:?}", opt.path_in);
    }

    let wtr = std::io::stdout();
    let wtr = std::io::BufWriter::new(wtr.lock());
    bin2c::embed_file(wtr, &opt.path_in)?;

    Ok(())
}
