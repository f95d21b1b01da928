//! Ready-made providers built on [`RestApiProvider`](crate::RestApiProvider).
//!
//! - [`AtomParkProvider`]: AtomPark (ePochta) SMS API, signed POST calls
//! - [`GoogleCustomSearchProvider`]: Google Custom Search, plain HTTPS GET

mod atompark;
mod google;

pub use atompark::{
    AddressBook, AtomParkProvider, Balance, Campaign, Currency, Phone, SmsDeliveryInfo,
    ATOMPARK_API_VERSION, ATOMPARK_AUTHORITY, ATOMPARK_DATE_FORMAT,
};
pub use google::{
    GoogleCustomSearchProvider, SearchInformation, SearchItem, SearchParameters, SearchResult,
    CUSTOM_SEARCH_PATH, GOOGLE_APIS_AUTHORITY,
};
