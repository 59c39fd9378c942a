use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::author::list_authors,
        api::author::create_author,
        api::author::get_author,
        api::author::update_author,
        api::author::delete_author,
        api::category::list_categories,
        api::category::create_category,
        api::category::get_category,
        api::category::update_category,
        api::category::delete_category,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
        api::customer::list_customers,
        api::customer::create_customer,
        api::customer::get_customer,
        api::customer::update_customer,
        api::customer::delete_customer,
        api::customer::customer_orders,
        api::order::list_orders,
        api::order::create_order,
        api::order::get_order,
        api::order::update_order,
        api::order::delete_order,
        api::ordering::list_orderings,
        api::ordering::create_ordering,
        api::ordering::delete_ordering,
    ),
    tags(
        (name = "bookstore", description = "Bookstore catalog and order API")
    )
)]
pub struct ApiDoc;
