//! Name-or-ID resolution
//!
//! The API only looks resources up by numeric ID. A user token that parses as
//! an ID is fetched directly; anything else is matched by exact name against a
//! full listing, first match in listing order wins.

use std::future::Future;

use super::error::{HcloudError, Result};
use super::models::{Firewall, SSHKey, Server};

/// A user supplied resource reference; any signed integer is an ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameOrId {
    Id(i64),
    Name(String),
}

impl NameOrId {
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(id) => NameOrId::Id(id),
            Err(_) => NameOrId::Name(token.to_string()),
        }
    }
}

/// Resources addressable by ID and display name
pub trait Named {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),*) => {
        $(impl Named for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_named!(Server, SSHKey, Firewall);

/// First item whose name equals `name` exactly
pub fn find_by_name<T: Named>(items: Vec<T>, name: &str) -> Option<T> {
    items.into_iter().find(|item| item.name() == name)
}

/// Resolve a token to a full resource.
///
/// `fetch_by_id` is only called for numeric tokens, `list_all` only for names.
pub async fn resolve<T, F, FFut, L, LFut>(
    token: &str,
    resource: &'static str,
    fetch_by_id: F,
    list_all: L,
) -> Result<T>
where
    T: Named,
    F: FnOnce(i64) -> FFut,
    FFut: Future<Output = Result<T>>,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<Vec<T>>>,
{
    match NameOrId::parse(token) {
        NameOrId::Id(id) => fetch_by_id(id).await,
        NameOrId::Name(name) => {
            let items = list_all().await?;
            find_by_name(items, &name).ok_or(HcloudError::NotFound {
                resource,
                token: name,
            })
        }
    }
}

/// Resolve a token to a resource ID without fetching numeric tokens
pub async fn resolve_id<T, L, LFut>(token: &str, resource: &'static str, list_all: L) -> Result<i64>
where
    T: Named,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<Vec<T>>>,
{
    match NameOrId::parse(token) {
        NameOrId::Id(id) => Ok(id),
        NameOrId::Name(name) => {
            let items = list_all().await?;
            find_by_name(items, &name)
                .map(|item| item.id())
                .ok_or(HcloudError::NotFound {
                    resource,
                    token: name,
                })
        }
    }
}
