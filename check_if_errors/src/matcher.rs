/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

/// Identity of a matched interface.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Interface {
    pub index: u32,
    pub descr: String,
    pub alias: Option<String>,
}

impl Interface {
    pub fn new(
        index: u32,
        descrs: &BTreeMap<u32, String>,
        aliases: &BTreeMap<u32, String>,
    ) -> Self {
        Self {
            index,
            descr: descrs
                .get(&index)
                .cloned()
                .unwrap_or_else(|| format!("if{}", index)),
            alias: aliases
                .get(&index)
                .map(|alias| alias.trim())
                .filter(|alias| !alias.is_empty())
                .map(String::from),
        }
    }

    /// Human-readable name: "descr (alias)", or just "descr".
    pub fn name(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} ({})", self.descr, alias),
            None => self.descr.clone(),
        }
    }
}

/// Indices whose ifDescr matches `descr` or whose ifAlias matches
/// `alias`, in ascending order.
pub fn match_interfaces(
    descrs: &BTreeMap<u32, String>,
    aliases: &BTreeMap<u32, String>,
    descr: Option<&Regex>,
    alias: Option<&Regex>,
) -> Vec<u32> {
    let by_descr = descr.into_iter().flat_map(|re| matching(descrs, re));
    let by_alias = alias.into_iter().flat_map(|re| matching(aliases, re));
    by_descr
        .chain(by_alias)
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}

fn matching<'a>(
    table: &'a BTreeMap<u32, String>,
    re: &'a Regex,
) -> impl Iterator<Item = u32> + 'a {
    table
        .iter()
        .filter(move |(_, value)| re.is_match(value))
        .map(|(index, _)| *index)
}
