//! AtomPark (ePochta) SMS API v3.
//!
//! Every call is a signed POST to `/api/sms/3.0/{action}` carrying
//! `version`, `action` and the public `key`. The API reports errors in the
//! flat `{"error": "...", "code": N}` shape and sends most lists in the
//! columnar `fields`/`data` encoding.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, Transport};
use crate::command::{Command, CommandError, Protocol};
use crate::config::{ApiKey, Authority, ClientConfig, PrivateKey};
use crate::provider::RestApiProvider;
use crate::response::{
    check_for_error, convert_arrayed_result, map_result, remake_json_for_list, IdResult,
    ResultError, RowList, SuccessResult,
};

/// Host every AtomPark call goes to.
pub const ATOMPARK_AUTHORITY: &str = "atompark.com";

/// API version sent with every call.
pub const ATOMPARK_API_VERSION: &str = "3.0";

/// Format of date parameters such as `datefrom`.
pub const ATOMPARK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Currencies a balance can be reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Uah,
    Rub,
}

impl Currency {
    /// Returns the code the API expects.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Uah => "UAH",
            Self::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address book as listed by `getAddressbook`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressBook {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of phones in the book.
    #[serde(default)]
    pub phones: Option<i64>,
    #[serde(default)]
    pub exceptions: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A phone record from `getPhoneFromAddressBook`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: i64,
    pub phone: String,
    #[serde(default)]
    pub normalphone: Option<String>,
    #[serde(default)]
    pub variables: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Account balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub balance_currency: f64,
    pub currency: String,
}

/// A campaign as listed by `getCampaignList`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub create_date: Option<String>,
}

/// Delivery state of one message of a campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmsDeliveryInfo {
    pub phone: String,
    #[serde(default)]
    pub sentdate: Option<String>,
    #[serde(default)]
    pub donedate: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Client for the AtomPark SMS API.
///
/// # Example
///
/// ```rust,ignore
/// use rest_command::providers::{AtomParkProvider, Currency};
/// use rest_command::{ApiKey, PrivateKey};
///
/// let provider = AtomParkProvider::new(
///     ApiKey::new("public-key")?,
///     PrivateKey::new("private-key")?,
///     true,
///     None,
/// )?;
///
/// let balance = provider.get_balance(Some(Currency::Usd)).await?;
/// println!("{} {}", balance.balance_currency, balance.currency);
/// ```
pub struct AtomParkProvider<T: Transport = HttpClient> {
    inner: RestApiProvider<T>,
    public_key: ApiKey,
}

impl AtomParkProvider<HttpClient> {
    /// Creates a provider for `atompark.com` backed by a new [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(
        public_key: ApiKey,
        private_key: PrivateKey,
        use_https: bool,
        config: Option<&ClientConfig>,
    ) -> Result<Self, CommandError> {
        let authority = Authority::new(ATOMPARK_AUTHORITY)?;
        let transport = HttpClient::new(config)?;
        Ok(Self::with_transport(
            authority,
            public_key,
            private_key,
            use_https,
            transport,
        ))
    }
}

impl<T: Transport> AtomParkProvider<T> {
    /// Creates a provider for any authority with an explicit transport.
    #[must_use]
    pub fn with_transport(
        authority: Authority,
        public_key: ApiKey,
        private_key: PrivateKey,
        use_https: bool,
        transport: T,
    ) -> Self {
        let protocol = if use_https {
            Protocol::atompark_https(authority, private_key)
        } else {
            Protocol::atompark_http(authority, private_key)
        };

        Self {
            inner: RestApiProvider::with_transport(protocol, transport),
            public_key,
        }
    }

    /// Returns the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &RestApiProvider<T> {
        &self.inner
    }

    /// Starts a command for an API action with the common parameters set.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPath`] if `action` is blank.
    pub fn run(&self, action: &str) -> Result<Command, CommandError> {
        if action.trim().is_empty() {
            return Err(CommandError::InvalidPath {
                path: action.to_string(),
            });
        }

        let public_key: &str = self.public_key.as_ref();

        Ok(self
            .inner
            .cmd_with_method(format!("/api/sms/{ATOMPARK_API_VERSION}/{action}"), HttpMethod::Post)?
            .with_parameter("version", ATOMPARK_API_VERSION)
            .with_parameter("action", action)
            .with_parameter("key", public_key))
    }

    /// Creates an address book and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn create_addressbook(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, CommandError> {
        let command = self
            .run("addAddressbook")?
            .with_parameter("name", name)
            .with_parameter_if_present("description", description);

        let created: IdResult = self.fetch_result(&command, check_for_error).await?;
        Ok(created.id)
    }

    /// Deletes an address book.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn delete_addressbook(&self, id: i64) -> Result<bool, CommandError> {
        let command = self.run("delAddressbook")?.with_parameter("idAddressBook", id);

        let outcome: SuccessResult = self.fetch_result(&command, check_for_error).await?;
        Ok(outcome.successful)
    }

    /// Lists address books, `count` at a time starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn list_addressbooks(
        &self,
        offset: u32,
        count: u32,
    ) -> Result<Vec<AddressBook>, CommandError> {
        let command = self
            .run("getAddressbook")?
            .with_parameter("from", offset)
            .with_parameter("offset", count);

        let books: RowList<AddressBook> =
            self.fetch_result(&command, remake_json_for_list).await?;
        Ok(books.items)
    }

    /// Lists phones matching a pattern, optionally within one address book.
    ///
    /// A blank pattern and an `addressbook_id` of `0` both mean "no filter".
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn list_phones_by_pattern(
        &self,
        pattern: Option<&str>,
        addressbook_id: i64,
        offset: u32,
        count: u32,
    ) -> Result<Vec<Phone>, CommandError> {
        let command = self
            .run("getPhoneFromAddressBook")?
            .with_parameter("from", offset)
            .with_parameter("offset", count)
            .with_parameter_if_present("phone", pattern)
            .with_parameter_if_positive("idAddressBook", addressbook_id);

        let phones: RowList<Phone> = self.fetch_result(&command, remake_json_for_list).await?;
        Ok(phones.items)
    }

    /// Deletes several phones at once.
    ///
    /// Returns `Ok(false)` without calling the API when `ids` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn delete_phones(&self, ids: &[i64]) -> Result<bool, CommandError> {
        if ids.is_empty() {
            return Ok(false);
        }

        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let command = self
            .run("delphonefromaddressbookgroup")?
            .with_parameter("idPhones", joined);

        let outcome: SuccessResult = self.fetch_result(&command, check_for_error).await?;
        Ok(outcome.successful)
    }

    /// Returns the account balance, in `currency` when given.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn get_balance(&self, currency: Option<Currency>) -> Result<Balance, CommandError> {
        let command = self.run("getUserBalance")?.with_condition_parameter(
            currency.is_some(),
            "currency",
            currency.map_or("", |c| c.as_str()),
        );

        self.fetch_result(&command, check_for_error).await
    }

    /// Returns per-phone delivery statistics of a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn get_campaign_statistics(
        &self,
        id: i64,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<SmsDeliveryInfo>, CommandError> {
        let mut command = self
            .run("getCampaignDeliveryStats")?
            .with_parameter("id", id);
        if let Some(since) = since {
            command = command.with_parameter(
                "datefrom",
                since.format(ATOMPARK_DATE_FORMAT).to_string(),
            );
        }

        self.fetch_result(&command, convert_arrayed_result).await
    }

    /// Lists all campaigns of the account.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the call fails.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, CommandError> {
        let command = self.run("getCampaignList")?;
        self.fetch_result(&command, convert_arrayed_result).await
    }

    async fn fetch_result<R: DeserializeOwned>(
        &self,
        command: &Command,
        transform: fn(Value) -> Result<Value, ResultError>,
    ) -> Result<R, CommandError> {
        let raw = self.inner.execute(command).await?;
        map_result(raw, transform)
    }
}

impl<T: Transport> Clone for AtomParkProvider<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for AtomParkProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomParkProvider")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
