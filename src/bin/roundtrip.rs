//! ファイルを埋め込み -> 復元して元に戻るかテストする。

use structopt::StructOpt;

use bin2c_embed as bin2c;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(parse(from_os_str))]
    path_in: std::path::PathBuf,
}

fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();

    let buf_orig = std::fs::read(&opt.path_in)?;
    let path_str = opt.path_in.to_string_lossy();
    let name = bin2c::identifier(&path_str);

    let mut text = Vec::<u8>::new();
    bin2c::embed(&mut text, name, &buf_orig)?;

    let embedded = bin2c::unembed(text.as_slice())?;

    assert_eq!(embedded.name, name);
    assert_eq!(embedded.data, buf_orig);

    Ok(())
}
