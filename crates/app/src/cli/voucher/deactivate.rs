use clap::Args;
use kiosk_app::{
    database::{self, Db},
    domain::vouchers::{PgVouchersService, VouchersService},
};

/// Deactivate a voucher by code.
#[derive(Debug, Args)]
pub(crate) struct DeactivateVoucherArgs {
    /// Redemption code
    #[arg(long)]
    code: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(args: DeactivateVoucherArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgVouchersService::new(Db::new(pool));

    service
        .set_active(&args.code, false)
        .await
        .map_err(|error| format!("failed to deactivate voucher: {error}"))?;

    println!("voucher {} deactivated", args.code);

    Ok(())
}
