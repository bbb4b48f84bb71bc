use clap::{Args, ValueEnum};
use jiff::Timestamp;
use kiosk::vouchers::DiscountType;
use kiosk_app::{
    database::{self, Db},
    domain::vouchers::{PgVouchersService, VouchersService, data::NewVoucher, records::VoucherUuid},
};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiscountTypeArg {
    Percentage,
    Fixed,
}

impl From<DiscountTypeArg> for DiscountType {
    fn from(value: DiscountTypeArg) -> Self {
        match value {
            DiscountTypeArg::Percentage => DiscountType::Percentage,
            DiscountTypeArg::Fixed => DiscountType::Fixed,
        }
    }
}

/// Create a voucher.
#[derive(Debug, Args)]
pub(crate) struct CreateVoucherArgs {
    /// Redemption code
    #[arg(long)]
    code: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Optional longer description
    #[arg(long)]
    description: Option<String>,

    /// How the discount value is interpreted
    #[arg(long, value_enum)]
    discount_type: DiscountTypeArg,

    /// Percentage or fixed rupiah amount
    #[arg(long)]
    discount_value: Decimal,

    /// Minimum subtotal in rupiah
    #[arg(long, default_value_t = 0)]
    min_purchase: u64,

    /// Cap for percentage discounts, in rupiah
    #[arg(long)]
    max_discount: Option<u64>,

    /// Maximum number of redemptions
    #[arg(long)]
    usage_limit: Option<u32>,

    /// Expiry moment (RFC 3339)
    #[arg(long)]
    valid_until: Option<Timestamp>,

    /// Create the voucher deactivated
    #[arg(long)]
    inactive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(args: CreateVoucherArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgVouchersService::new(Db::new(pool));

    let voucher = service
        .create_voucher(NewVoucher {
            uuid: VoucherUuid::new(),
            code: args.code,
            name: args.name,
            description: args.description,
            discount_type: args.discount_type.into(),
            discount_value: args.discount_value,
            min_purchase: args.min_purchase,
            max_discount: args.max_discount,
            usage_limit: args.usage_limit,
            is_active: !args.inactive,
            valid_until: args.valid_until,
        })
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    println!("voucher_uuid: {}", voucher.uuid);
    println!("code: {}", voucher.code);

    Ok(())
}
