//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use kiosk::vouchers::DiscountType;
use kiosk_app::{
    context::AppContext,
    domain::{
        categories::{MockCategoriesService, records::{Category, CategoryUuid}},
        checkout::MockCheckoutService,
        products::{MockProductsService, records::{Product, ProductUuid}},
        testimonials::{MockTestimonialsService, records::{Testimonial, TestimonialUuid}},
        vouchers::{MockVouchersService, records::{VoucherRecord, VoucherUuid}},
    },
};

use crate::state::State;

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Blox Fruits Permanent Dragon".to_string(),
        description: None,
        price: 150_000,
        image_url: None,
        category: None,
        stock: 5,
        is_available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str) -> Category {
    Category {
        uuid,
        name: name.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_voucher(uuid: VoucherUuid) -> VoucherRecord {
    VoucherRecord {
        uuid,
        code: "HEMAT10".to_string(),
        name: "Hemat 10%".to_string(),
        description: None,
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(10_u32),
        min_purchase: 0,
        max_discount: None,
        usage_limit: None,
        used_count: 0,
        is_active: true,
        valid_until: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_testimonial(uuid: TestimonialUuid, approved: bool) -> Testimonial {
    Testimonial {
        uuid,
        username: "rizky".to_string(),
        rating: 5,
        item_bought: "Permanent Dragon".to_string(),
        message: "Fast delivery, trusted seller".to_string(),
        approved,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_get_products().never();
    products.expect_stock_levels().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_create_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_vouchers_mock() -> MockVouchersService {
    let mut vouchers = MockVouchersService::new();

    vouchers.expect_list_vouchers().never();
    vouchers.expect_create_voucher().never();
    vouchers.expect_update_voucher().never();
    vouchers.expect_delete_voucher().never();
    vouchers.expect_validate().never();
    vouchers.expect_record_usage().never();
    vouchers.expect_set_active().never();

    vouchers
}

fn strict_testimonials_mock() -> MockTestimonialsService {
    let mut testimonials = MockTestimonialsService::new();

    testimonials.expect_list_testimonials().never();
    testimonials.expect_submit_testimonial().never();
    testimonials.expect_approve_testimonial().never();
    testimonials.expect_delete_testimonial().never();

    testimonials
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

fn strict_app_context() -> AppContext {
    AppContext {
        products: Arc::new(strict_products_mock()),
        categories: Arc::new(strict_categories_mock()),
        vouchers: Arc::new(strict_vouchers_mock()),
        testimonials: Arc::new(strict_testimonials_mock()),
        checkout: Arc::new(strict_checkout_mock()),
    }
}

pub(crate) fn state_with_admin() -> Arc<State> {
    Arc::new(State::new(strict_app_context(), TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        ..strict_app_context()
    };

    Arc::new(State::new(app, TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn state_with_categories(categories: MockCategoriesService) -> Arc<State> {
    let app = AppContext {
        categories: Arc::new(categories),
        ..strict_app_context()
    };

    Arc::new(State::new(app, TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn state_with_vouchers(vouchers: MockVouchersService) -> Arc<State> {
    let app = AppContext {
        vouchers: Arc::new(vouchers),
        ..strict_app_context()
    };

    Arc::new(State::new(app, TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn state_with_testimonials(testimonials: MockTestimonialsService) -> Arc<State> {
    let app = AppContext {
        testimonials: Arc::new(testimonials),
        ..strict_app_context()
    };

    Arc::new(State::new(app, TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn state_with_checkout(checkout: MockCheckoutService) -> Arc<State> {
    let app = AppContext {
        checkout: Arc::new(checkout),
        ..strict_app_context()
    };

    Arc::new(State::new(app, TEST_ADMIN_TOKEN.to_string()))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_categories(categories)))
            .push(route),
    )
}

pub(crate) fn vouchers_service(vouchers: MockVouchersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_vouchers(vouchers)))
            .push(route),
    )
}

pub(crate) fn testimonials_service(testimonials: MockTestimonialsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_testimonials(testimonials)))
            .push(route),
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_checkout(checkout)))
            .push(route),
    )
}
