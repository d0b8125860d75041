//! Store API records, request forms and response wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{decode_with_source, Decoded};
use crate::form::FormBody;
use crate::result::{ProbeError, ProbeResult};

/// `message` strings the store returns
pub mod messages {
    /// Account was created
    pub const USER_CREATED: &str = "User created!";
    /// Credentials matched an account
    pub const USER_EXISTS: &str = "User exists!";
    /// Account address was updated
    pub const USER_UPDATED: &str = "User updated!";
    /// Account was deleted
    pub const ACCOUNT_DELETED: &str = "Account deleted!";
    /// Endpoint called with the wrong verb (responseCode 405)
    pub const METHOD_NOT_SUPPORTED: &str = "This request method is not supported.";
    /// Search posted without a term (responseCode 400)
    pub const MISSING_SEARCH_PARAM: &str =
        "Bad request, search_product parameter is missing in POST request.";
}

// =============================================================================
// RECORDS
// =============================================================================

/// Audience a category belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserType {
    /// `Women`, `Men`, `Kids`
    pub usertype: String,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Audience
    pub usertype: UserType,
    /// Category name (`Tops`, `Dress`, ...)
    pub category: String,
}

/// Catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Price with currency prefix, e.g. `Rs. 500`
    pub price: String,
    /// Brand name
    pub brand: String,
    /// Category
    pub category: Category,
}

impl Product {
    /// Whether `term` occurs, ignoring case, in the name, brand, category or
    /// audience of this product.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [
            self.name.as_str(),
            self.brand.as_str(),
            self.category.category.as_str(),
            self.category.usertype.usertype.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Brand entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand id
    pub id: u64,
    /// Brand name
    pub brand: String,
}

/// Account details as returned by `getUserDetailByEmail`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    /// Account id
    pub id: u64,
    /// Full name
    pub name: String,
    /// Login email
    pub email: String,
    /// `Mr` / `Mrs`
    #[serde(default)]
    pub title: String,
    /// Day of birth (may be empty)
    #[serde(default)]
    pub birth_day: String,
    /// Month of birth
    #[serde(default)]
    pub birth_month: String,
    /// Year of birth
    #[serde(default)]
    pub birth_year: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Company
    #[serde(default)]
    pub company: String,
    /// Address line 1
    #[serde(default)]
    pub address1: String,
    /// Address line 2
    #[serde(default)]
    pub address2: String,
    /// Country
    #[serde(default)]
    pub country: String,
    /// State or region
    #[serde(default)]
    pub state: String,
    /// City
    #[serde(default)]
    pub city: String,
    /// Postal code
    #[serde(default)]
    pub zipcode: String,
}

// =============================================================================
// REQUEST FORMS
// =============================================================================

/// Fields posted to `createAccount`.
///
/// Optional fields left as `None` are omitted from the form body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountForm {
    /// Full name
    pub name: String,
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
    /// `Mr` / `Mrs`
    pub title: Option<String>,
    /// Day of birth
    pub birth_date: Option<String>,
    /// Month of birth
    pub birth_month: Option<String>,
    /// Year of birth
    pub birth_year: Option<String>,
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Company
    pub company: Option<String>,
    /// Address line 1
    pub address1: String,
    /// Address line 2
    pub address2: Option<String>,
    /// Country
    pub country: String,
    /// State or region
    pub state: String,
    /// City
    pub city: String,
    /// Postal code
    pub zipcode: String,
    /// Mobile number
    pub mobile_number: String,
}

impl AccountForm {
    /// Form body in the store's field order
    #[must_use]
    pub fn to_form(&self) -> FormBody {
        FormBody::new()
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password)
            .field("title", self.title.clone())
            .field("birth_date", self.birth_date.clone())
            .field("birth_month", self.birth_month.clone())
            .field("birth_year", self.birth_year.clone())
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("company", self.company.clone())
            .field("address1", &self.address1)
            .field("address2", self.address2.clone())
            .field("country", &self.country)
            .field("state", &self.state)
            .field("city", &self.city)
            .field("zipcode", &self.zipcode)
            .field("mobile_number", &self.mobile_number)
    }
}

/// Address fields sent to `updateAccount`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdate {
    /// Address line 1
    pub address1: String,
    /// Address line 2
    pub address2: String,
    /// Postal code
    pub zipcode: String,
    /// City
    pub city: String,
}

impl AddressUpdate {
    /// Append the address fields to `form`
    #[must_use]
    pub fn extend_form(&self, form: FormBody) -> FormBody {
        form.field("address1", &self.address1)
            .field("address2", &self.address2)
            .field("zipcode", &self.zipcode)
            .field("city", &self.city)
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// A store response: HTTP status, raw body and the tolerantly decoded JSON.
///
/// The store reports failures through `responseCode` inside a 200 response,
/// so the HTTP status alone says little.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body text
    pub body: String,
    /// Decoded body
    pub decoded: Decoded,
}

impl ApiResponse {
    /// Build a response from a status and body text
    #[must_use]
    pub fn from_body(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let decoded = decode_with_source(&body);
        Self {
            status,
            body,
            decoded,
        }
    }

    /// Decoded JSON, if any
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.decoded.value()
    }

    /// `responseCode` reported inside the body
    #[must_use]
    pub fn response_code(&self) -> Option<i64> {
        self.json()?.get("responseCode")?.as_i64()
    }

    /// `message` reported inside the body
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.json()?.get("message")?.as_str()
    }

    /// Deserialize a top-level field
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Undecodable`] if the body held no JSON,
    /// [`ProbeError::MissingField`] if `key` is absent, or
    /// [`ProbeError::Json`] if it has the wrong shape.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> ProbeResult<T> {
        let json = self.json().ok_or(ProbeError::Undecodable {
            len: self.body.len(),
        })?;
        let value = json.get(key).ok_or_else(|| ProbeError::MissingField {
            field: key.to_string(),
        })?;
        Ok(T::deserialize(value)?)
    }

    /// `products` array
    pub fn products(&self) -> ProbeResult<Vec<Product>> {
        self.field("products")
    }

    /// `brands` array
    pub fn brands(&self) -> ProbeResult<Vec<Brand>> {
        self.field("brands")
    }

    /// `user` object
    pub fn user(&self) -> ProbeResult<UserDetail> {
        self.field("user")
    }
}
