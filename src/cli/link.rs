//
//  tonicpow
//  cli/link.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{Link, LinkService};
use crate::output::{or_dash, print_field, print_header, TableBuilder, TableOutput};

use super::GlobalOptions;

/// Check tracking links
#[derive(Args, Debug)]
pub struct LinkCommand {
    #[command(subcommand)]
    pub command: LinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LinkSubcommand {
    /// Look up a link by its short code
    Check(CheckArgs),

    /// View a link by id
    View(ViewArgs),

    /// List links created by a user
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Short code (the part after the link domain)
    pub short_code: String,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Link id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// User id
    #[arg(long, short = 'u')]
    pub user: u64,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'L', default_value = "25")]
    pub limit: u32,
}

impl LinkCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            LinkSubcommand::Check(args) => {
                let client = global.client().await?;
                let link = client.check_link(&args.short_code).await?;
                global.output().write(&LinkDetail::from(link))
            }
            LinkSubcommand::View(args) => {
                let client = global.client().await?;
                let link = client.get_link(args.id).await?;
                global.output().write(&LinkDetail::from(link))
            }
            LinkSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let page = client
            .list_links_by_user_id(args.user, args.page, args.limit)
            .await?;

        let items: Vec<LinkDetail> = page.iter().cloned().map(LinkDetail::from).collect();
        global.output().write_list(&items)
    }
}

#[derive(Debug, Serialize)]
struct LinkDetail {
    id: u64,
    campaign_id: u64,
    user_id: u64,
    short_code: String,
    short_code_url: String,
    target_url: String,
    total_clicks: u64,
    total_conversions: u64,
}

impl From<Link> for LinkDetail {
    fn from(link: Link) -> Self {
        let short_code = if link.custom_short_code.is_empty() {
            link.short_code
        } else {
            link.custom_short_code
        };
        Self {
            id: link.id,
            campaign_id: link.campaign_id,
            user_id: link.user_id,
            short_code,
            short_code_url: link.short_code_url,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            total_conversions: link.total_conversions,
        }
    }
}

impl TableOutput for LinkDetail {
    fn print_table(&self, color: bool) {
        let code = if color {
            style(&self.short_code).cyan().bold().to_string()
        } else {
            self.short_code.clone()
        };
        print_header(&format!("Link {}", self.id));
        print_field("Short code", &code, color);
        print_field("URL", or_dash(&self.short_code_url), color);
        print_field("Target", or_dash(&self.target_url), color);
        print_field("Campaign", &self.campaign_id.to_string(), color);
        print_field("User", &self.user_id.to_string(), color);
        print_field("Clicks", &self.total_clicks.to_string(), color);
        print_field("Conversions", &self.total_conversions.to_string(), color);
    }

    fn print_rows(values: &[Self], color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Short Code", "Campaign", "Clicks", "Conversions"])
            .rows(values.iter().map(|link| {
                [
                    link.id.to_string(),
                    link.short_code.clone(),
                    link.campaign_id.to_string(),
                    link.total_clicks.to_string(),
                    link.total_conversions.to_string(),
                ]
            }))
            .print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_short_code_wins() {
        let link = Link {
            short_code: "abc123".to_string(),
            custom_short_code: "tonic".to_string(),
            ..Link::default()
        };
        assert_eq!(LinkDetail::from(link).short_code, "tonic");

        let link = Link {
            short_code: "abc123".to_string(),
            ..Link::default()
        };
        assert_eq!(LinkDetail::from(link).short_code, "abc123");
    }
}
