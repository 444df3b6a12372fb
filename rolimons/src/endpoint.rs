use strum_macros::Display;
/// Enum for all endpoints for the Rolimons API
#[derive(Display, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    #[strum(serialize = "/market/v1/saleactivity")]
    SaleActivity,
    #[strum(serialize = "/itemapi/itemdetails")]
    ItemDetails,
}
