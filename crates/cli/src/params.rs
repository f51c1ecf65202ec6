//! Invocation parameters.
//!
//! The binary takes one optional argument, a query string in the host
//! player's plugin style: `action=search` (the default) or
//! `action=download&id={subtitle_id}`. Search listings print these exact
//! strings as their invocation targets.

use std::collections::HashMap;

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search,
    Download { id: String },
}

pub fn parse_action(query: Option<&str>) -> Result<Action> {
    let Some(query) = query else {
        return Ok(Action::Search);
    };

    let params: HashMap<String, String> =
        url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();

    match params.get("action").map(String::as_str) {
        Some("download") => match params.get("id") {
            Some(id) if !id.is_empty() => Ok(Action::Download { id: id.clone() }),
            _ => bail!("action=download requires an id parameter"),
        },
        _ => Ok(Action::Search),
    }
}
