//! Account display formatting
//!
//! Formats the chart of accounts as a flat table or an indented tree.

use std::collections::HashMap;

use crate::models::Account;
use crate::reports::ReportTable;
use crate::services::AccountNode;

use super::report::format_table;

/// Format the chart of accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let names: HashMap<_, _> = accounts.iter().map(|a| (a.id, a.name.as_str())).collect();

    let mut table = ReportTable::new(["id", "name", "level", "parent"]);
    for account in accounts {
        let parent = account
            .parent_id
            .map(|id| names.get(&id).map(|n| n.to_string()).unwrap_or_else(|| format!("#{}", id)))
            .unwrap_or_default();

        table.push_row(vec![
            account.id.to_string(),
            account.name.clone(),
            account.level.to_string(),
            parent,
        ]);
    }

    format_table(&table)
}

/// Format the chart of accounts as an indented tree
pub fn format_account_tree(nodes: &[AccountNode]) -> String {
    if nodes.is_empty() {
        return "No accounts found.".to_string();
    }

    fn walk(output: &mut String, node: &AccountNode, depth: usize) {
        let marker = if node.account.is_leaf() { "-" } else { "+" };
        output.push_str(&format!(
            "{}{} {} [{}]\n",
            "  ".repeat(depth),
            marker,
            node.account.name,
            node.account.id
        ));
        for child in &node.children {
            walk(output, child, depth + 1);
        }
    }

    let mut output = String::new();
    for node in nodes {
        walk(&mut output, node, 0);
    }
    output
}
