//
//  tonicpow
//  cli/campaign.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{
    Campaign, CampaignListOptions, CampaignService, CampaignStatistics, FeedType,
};
use crate::api::SortOrder;
use crate::output::{
    format_bool, format_satoshis, or_dash, print_field, print_header, truncate, write_raw,
    TableBuilder, TableOutput,
};

use super::GlobalOptions;

/// View and list campaigns
#[derive(Args, Debug)]
pub struct CampaignCommand {
    #[command(subcommand)]
    pub command: CampaignSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CampaignSubcommand {
    /// View a campaign by id, slug or short code
    View(ViewArgs),

    /// List campaigns
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Print the campaign feed (rss, atom or json)
    Feed(FeedArgs),

    /// Show active and expired campaign counts
    Stats,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Campaign id, or slug / short code with the matching flag
    pub campaign: String,

    /// Treat CAMPAIGN as a slug
    #[arg(long, conflicts_with = "short_code")]
    pub slug: bool,

    /// Treat CAMPAIGN as a link short code
    #[arg(long)]
    pub short_code: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'L', default_value = "25")]
    pub limit: u32,

    /// Sort field (balance, created_at, links_created, paid_clicks, ...)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order (asc or desc)
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Filter by title or description
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only campaigns with at least this many satoshis
    #[arg(long, default_value = "0")]
    pub min_balance: u64,

    /// Include expired campaigns
    #[arg(long)]
    pub include_expired: bool,

    /// Only campaigns promoting this target URL
    #[arg(long, conflicts_with_all = ["search", "min_balance", "include_expired"])]
    pub url: Option<String>,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Feed format (rss, atom, json)
    #[arg(long = "type", short = 't', default_value = "rss")]
    pub feed_type: String,
}

impl CampaignCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CampaignSubcommand::View(args) => self.view(args, global).await,
            CampaignSubcommand::List(args) => self.list(args, global).await,
            CampaignSubcommand::Feed(args) => self.feed(args, global).await,
            CampaignSubcommand::Stats => self.stats(global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;

        let campaign = if args.slug {
            client.get_campaign_by_slug(&args.campaign).await?
        } else if args.short_code {
            client.get_campaign_by_short_code(&args.campaign).await?
        } else {
            let Ok(id) = args.campaign.parse::<u64>() else {
                bail!(
                    "'{}' is not a campaign id. Use --slug or --short-code to look it up by name.",
                    args.campaign
                );
            };
            client.get_campaign(id).await?
        };

        global.output().write(&CampaignDetail::from(&campaign))
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;

        let mut options = CampaignListOptions::new()
            .page(args.page)
            .per_page(args.limit)
            .minimum_balance(args.min_balance)
            .include_expired(args.include_expired);
        if let Some(sort) = &args.sort {
            options = options.sort_by(sort);
        }
        if let Some(order) = args.order {
            options = options.sort_order(order);
        }
        if let Some(search) = &args.search {
            options = options.search(search);
        }

        let page = match &args.url {
            Some(url) => client.list_campaigns_by_url(url, options.list).await?,
            None => client.list_campaigns(options).await?,
        };

        let items: Vec<CampaignListItem> = page.iter().map(CampaignListItem::from).collect();
        global.output().write_list(&items)
    }

    async fn feed(&self, args: &FeedArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let feed = client
            .campaigns_feed(FeedType::from(args.feed_type.as_str()))
            .await?;
        write_raw(&feed)
    }

    async fn stats(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let stats = client.campaign_statistics().await?;
        global.output().write(&StatsDisplay::from(stats))
    }
}

// Display Types

#[derive(Debug, Serialize)]
pub(super) struct CampaignListItem {
    id: u64,
    title: String,
    balance_satoshis: i64,
    pay_per_click_rate: f64,
    currency: String,
    links_created: u64,
    paid_clicks: u64,
}

impl From<&Campaign> for CampaignListItem {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            title: campaign.title.clone(),
            balance_satoshis: campaign.balance_satoshis,
            pay_per_click_rate: campaign.pay_per_click_rate,
            currency: campaign.currency.clone(),
            links_created: campaign.links_created,
            paid_clicks: campaign.paid_clicks,
        }
    }
}

impl CampaignListItem {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.title, 40),
            format_satoshis(self.balance_satoshis),
            format!("{} {}", self.pay_per_click_rate, or_dash(&self.currency)),
            self.links_created.to_string(),
            self.paid_clicks.to_string(),
        ]
    }
}

impl TableOutput for CampaignListItem {
    fn print_table(&self, color: bool) {
        let id = if color {
            style(self.id).cyan().bold().to_string()
        } else {
            self.id.to_string()
        };
        println!(
            "{:<8} {:<40} {}",
            id,
            truncate(&self.title, 40),
            format_satoshis(self.balance_satoshis)
        );
    }

    fn print_rows(values: &[Self], color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Title", "Balance", "Per Click", "Links", "Paid Clicks"])
            .rows(values.iter().map(CampaignListItem::cells))
            .print();
    }
}

#[derive(Debug, Serialize)]
struct CampaignDetail {
    id: u64,
    title: String,
    description: String,
    slug: String,
    target_url: String,
    advertiser: Option<String>,
    balance_satoshis: i64,
    pay_per_click_rate: f64,
    currency: String,
    funding_address: String,
    links_created: u64,
    paid_clicks: u64,
    paid_conversions: u64,
    goals: Vec<String>,
    bot_protection: bool,
    match_domain: bool,
    created_at: String,
    expires_at: String,
}

impl From<&Campaign> for CampaignDetail {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            slug: campaign.slug.clone(),
            target_url: campaign.target_url.clone(),
            advertiser: campaign
                .advertiser_profile
                .as_ref()
                .map(|profile| profile.name.clone()),
            balance_satoshis: campaign.balance_satoshis,
            pay_per_click_rate: campaign.pay_per_click_rate,
            currency: campaign.currency.clone(),
            funding_address: campaign.funding_address.clone(),
            links_created: campaign.links_created,
            paid_clicks: campaign.paid_clicks,
            paid_conversions: campaign.paid_conversions,
            goals: campaign
                .goals
                .iter()
                .map(|goal| format!("{} ({} {})", goal.name, goal.payout_rate, goal.payout_type))
                .collect(),
            bot_protection: campaign.bot_protection,
            match_domain: campaign.match_domain,
            created_at: campaign.created_at.clone(),
            expires_at: campaign.expires_at.clone(),
        }
    }
}

impl TableOutput for CampaignDetail {
    fn print_table(&self, color: bool) {
        print_header(&format!("Campaign {}: {}", self.id, self.title));
        println!();

        if !self.description.is_empty() {
            println!("{}", self.description);
            println!();
        }

        print_field("Target URL", or_dash(&self.target_url), color);
        print_field("Slug", or_dash(&self.slug), color);
        if let Some(advertiser) = &self.advertiser {
            print_field("Advertiser", advertiser, color);
        }
        print_field("Balance", &format_satoshis(self.balance_satoshis), color);
        print_field(
            "Pay per click",
            &format!("{} {}", self.pay_per_click_rate, or_dash(&self.currency)),
            color,
        );
        print_field("Funding address", or_dash(&self.funding_address), color);
        print_field("Links created", &self.links_created.to_string(), color);
        print_field("Paid clicks", &self.paid_clicks.to_string(), color);
        print_field("Paid conversions", &self.paid_conversions.to_string(), color);
        print_field("Bot protection", &format_bool(self.bot_protection, color), color);
        print_field("Match domain", &format_bool(self.match_domain, color), color);
        print_field("Created", or_dash(&self.created_at), color);
        print_field("Expires", or_dash(&self.expires_at), color);

        if !self.goals.is_empty() {
            println!();
            println!("{}", style("Goals").bold());
            for goal in &self.goals {
                println!("  - {}", goal);
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsDisplay {
    active: u64,
    expired: u64,
}

impl From<CampaignStatistics> for StatsDisplay {
    fn from(stats: CampaignStatistics) -> Self {
        Self {
            active: stats.active,
            expired: stats.expired,
        }
    }
}

impl TableOutput for StatsDisplay {
    fn print_table(&self, color: bool) {
        print_header("Campaign Statistics");
        print_field("Active", &self.active.to_string(), color);
        print_field("Expired", &self.expired.to_string(), color);
    }
}
