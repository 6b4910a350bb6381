use std::path::PathBuf;

use clap::Args;

use crate::download::fetch::{self, DownloadSelection};
use crate::download::s3::AwsCli;

#[derive(Args)]
pub struct DownloadArgs {
    /// Directory to unpack the databases into
    #[arg(long, default_value = "./alignment_dbs", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Also download the bfd hhblits database
    #[arg(long)]
    pub download_bfd: bool,

    /// Also download the cfdb hhblits database
    #[arg(long)]
    pub download_cfdb: bool,

    /// Also download the RNA databases (rfam, rnacentral, nucleotide_collection)
    #[arg(long)]
    pub download_rna_dbs: bool,

    /// Jackhmmer databases to download. Defaults to all of uniprot, uniref90,
    /// mgnify, pdb_seqres; 'uniref90 pdb_seqres' makes a minimal test set
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub jackhmmer_dbs: Option<Vec<String>>,

    /// HHblits databases to download. Defaults to uniref30; when given,
    /// --download-bfd and --download-cfdb are ignored
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub hhblits_dbs: Option<Vec<String>>,
}

pub fn run(args: DownloadArgs) -> anyhow::Result<()> {
    let selection = DownloadSelection {
        jackhmmer_dbs: args.jackhmmer_dbs,
        hhblits_dbs: args.hhblits_dbs,
        download_bfd: args.download_bfd,
        download_cfdb: args.download_cfdb,
        download_rna_dbs: args.download_rna_dbs,
    };
    fetch::run(&args.output_dir, &selection, &AwsCli)?;
    Ok(())
}
