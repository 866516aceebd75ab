//
//  tonicpow
//  cli/advertiser.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{AdvertiserProfile, AdvertiserService, App};
use crate::api::{ListOptions, SortOrder};
use crate::output::{or_dash, print_field, print_header, truncate, TableBuilder, TableOutput};

use super::campaign::CampaignListItem;
use super::GlobalOptions;

/// View advertiser profiles
#[derive(Args, Debug)]
pub struct AdvertiserCommand {
    #[command(subcommand)]
    pub command: AdvertiserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdvertiserSubcommand {
    /// View an advertiser profile
    View(ViewArgs),

    /// List campaigns owned by an advertiser profile
    Campaigns(ListArgs),

    /// List apps owned by an advertiser profile
    Apps(ListArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Advertiser profile id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Advertiser profile id
    pub id: u64,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'L', default_value = "25")]
    pub limit: u32,

    /// Sort field
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order (asc or desc)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

impl ListArgs {
    fn options(&self) -> ListOptions {
        let mut options = ListOptions::new().page(self.page).per_page(self.limit);
        if let Some(sort) = &self.sort {
            options = options.sort_by(sort);
        }
        if let Some(order) = self.order {
            options = options.sort_order(order);
        }
        options
    }
}

impl AdvertiserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AdvertiserSubcommand::View(args) => self.view(args, global).await,
            AdvertiserSubcommand::Campaigns(args) => self.campaigns(args, global).await,
            AdvertiserSubcommand::Apps(args) => self.apps(args, global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let profile = client.get_advertiser_profile(args.id).await?;
        global.output().write(&AdvertiserDetail::from(profile))
    }

    async fn campaigns(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let page = client
            .list_campaigns_by_advertiser_profile(args.id, args.options())
            .await?;

        let items: Vec<CampaignListItem> = page.iter().map(CampaignListItem::from).collect();
        global.output().write_list(&items)
    }

    async fn apps(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let page = client
            .list_apps_by_advertiser_profile(args.id, args.options())
            .await?;

        let items: Vec<AppListItem> = page.iter().map(AppListItem::from).collect();
        global.output().write_list(&items)
    }
}

// Display Types

#[derive(Debug, Serialize)]
struct AdvertiserDetail {
    id: u64,
    name: String,
    homepage_url: String,
    icon_url: String,
    public_guid: String,
}

impl From<AdvertiserProfile> for AdvertiserDetail {
    fn from(profile: AdvertiserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            homepage_url: profile.homepage_url,
            icon_url: profile.icon_url,
            public_guid: profile.public_guid,
        }
    }
}

impl TableOutput for AdvertiserDetail {
    fn print_table(&self, color: bool) {
        let title = format!("Advertiser {}: {}", self.id, self.name);
        print_header(&title);
        print_field("Homepage", or_dash(&self.homepage_url), color);
        print_field("Icon", or_dash(&self.icon_url), color);
        print_field("Public GUID", or_dash(&self.public_guid), color);
    }
}

#[derive(Debug, Serialize)]
struct AppListItem {
    id: u64,
    name: String,
    description: String,
}

impl From<&App> for AppListItem {
    fn from(app: &App) -> Self {
        Self {
            id: app.id,
            name: app.name.clone(),
            description: app.description.clone(),
        }
    }
}

impl TableOutput for AppListItem {
    fn print_table(&self, color: bool) {
        let id = if color {
            style(self.id).cyan().bold().to_string()
        } else {
            self.id.to_string()
        };
        println!("{:<8} {:<30} {}", id, self.name, truncate(or_dash(&self.description), 50));
    }

    fn print_rows(values: &[Self], color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Name", "Description"])
            .rows(values.iter().map(|app| {
                [
                    app.id.to_string(),
                    app.name.clone(),
                    truncate(or_dash(&app.description), 50),
                ]
            }))
            .print();
    }
}
