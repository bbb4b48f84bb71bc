use clap::{Parser, Subcommand};

mod db;
mod voucher;

#[derive(Debug, Parser)]
#[command(name = "kiosk-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Voucher(voucher::VoucherCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Voucher(command) => voucher::run(command).await,
        }
    }
}
