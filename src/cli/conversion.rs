//
//  tonicpow
//  cli/conversion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{Conversion, ConversionService};
use crate::output::{format_status, or_dash, print_field, print_header, TableOutput};

use super::GlobalOptions;

/// View conversions
#[derive(Args, Debug)]
pub struct ConversionCommand {
    #[command(subcommand)]
    pub command: ConversionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConversionSubcommand {
    /// View a conversion
    View(ViewArgs),

    /// Cancel a delayed conversion before it pays out
    Cancel(CancelArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Conversion id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Conversion id
    pub id: u64,

    /// Reason recorded with the cancellation
    #[arg(long, short = 'r', default_value = "")]
    pub reason: String,
}

impl ConversionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConversionSubcommand::View(args) => {
                let client = global.client().await?;
                let conversion = client.get_conversion(args.id).await?;
                global.output().write(&ConversionDetail::from(conversion))
            }
            ConversionSubcommand::Cancel(args) => self.cancel(args, global).await,
        }
    }

    async fn cancel(&self, args: &CancelArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let conversion = client.cancel_conversion(args.id, &args.reason).await?;

        let output = global.output();
        if global.json {
            return output.write(&ConversionDetail::from(conversion));
        }
        output.write_success(&format!(
            "Conversion {} is now {}",
            style(conversion.id).cyan(),
            or_dash(&conversion.status)
        ));
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ConversionDetail {
    id: u64,
    campaign_id: u64,
    goal_id: u64,
    goal_name: String,
    user_id: u64,
    amount: f64,
    status: String,
    status_data: String,
    payout_after: String,
    tx_id: String,
}

impl From<Conversion> for ConversionDetail {
    fn from(conversion: Conversion) -> Self {
        Self {
            id: conversion.id,
            campaign_id: conversion.campaign_id,
            goal_id: conversion.goal_id,
            goal_name: conversion.goal_name,
            user_id: conversion.user_id,
            amount: conversion.amount,
            status: conversion.status,
            status_data: conversion.status_data,
            payout_after: conversion.payout_after,
            tx_id: conversion.tx_id,
        }
    }
}

impl TableOutput for ConversionDetail {
    fn print_table(&self, color: bool) {
        print_header(&format!("Conversion {}", self.id));
        print_field("Status", &format_status(or_dash(&self.status), color), color);
        if !self.status_data.is_empty() {
            print_field("Status data", &self.status_data, color);
        }
        print_field("Campaign", &self.campaign_id.to_string(), color);
        print_field(
            "Goal",
            &format!("{} ({})", or_dash(&self.goal_name), self.goal_id),
            color,
        );
        print_field("User", &self.user_id.to_string(), color);
        print_field("Amount", &self.amount.to_string(), color);
        print_field("Payout after", or_dash(&self.payout_after), color);
        print_field("Transaction", or_dash(&self.tx_id), color);
    }
}
