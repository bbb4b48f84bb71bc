use clap::{Args, Subcommand};

mod create;
mod deactivate;
mod list;

#[derive(Debug, Args)]
pub(crate) struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    Create(create::CreateVoucherArgs),
    List(list::ListVouchersArgs),
    Deactivate(deactivate::DeactivateVoucherArgs),
}

pub(crate) async fn run(command: VoucherCommand) -> Result<(), String> {
    match command.command {
        VoucherSubcommand::Create(args) => create::run(args).await,
        VoucherSubcommand::List(args) => list::run(args).await,
        VoucherSubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}
