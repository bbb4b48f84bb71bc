use clap::Args;
use kiosk_app::{
    database::{self, Db},
    domain::vouchers::{PgVouchersService, VouchersService},
};

/// List all vouchers.
#[derive(Debug, Args)]
pub(crate) struct ListVouchersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(args: ListVouchersArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgVouchersService::new(Db::new(pool));

    let vouchers = service
        .list_vouchers()
        .await
        .map_err(|error| format!("failed to list vouchers: {error}"))?;

    for voucher in vouchers {
        let usage = match voucher.usage_limit {
            Some(limit) => format!("{}/{limit}", voucher.used_count),
            None => format!("{}/∞", voucher.used_count),
        };

        println!(
            "{}\t{}\t{:?} {}\tused {}\t{}",
            voucher.code,
            voucher.name,
            voucher.discount_type,
            voucher.discount_value,
            usage,
            if voucher.is_active { "active" } else { "inactive" },
        );
    }

    Ok(())
}
