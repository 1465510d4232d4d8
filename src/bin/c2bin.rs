use std::io::BufReader;

use structopt::StructOpt;

use bin2c_embed as bin2c;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(parse(from_os_str))]
    path_in: std::path::PathBuf,

    #[structopt(parse(from_os_str))]
    path_out: std::path::PathBuf,
}

fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();

    let rdr = BufReader::new(std::fs::File::open(opt.path_in)?);
    let embedded = bin2c::unembed(rdr)?;

    std::fs::write(opt.path_out, embedded.data)?;

    Ok(())
}
