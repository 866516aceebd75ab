//
//  tonicpow
//  cli/goal.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::resources::{Goal, GoalService};
use crate::output::{or_dash, print_field, print_header, TableOutput};

use super::GlobalOptions;

/// View campaign goals
#[derive(Args, Debug)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GoalSubcommand {
    /// View a goal
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Goal id
    pub id: u64,
}

impl GoalCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            GoalSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let goal = client.get_goal(args.id).await?;
        global.output().write(&GoalDetail::from(goal))
    }
}

#[derive(Debug, Serialize)]
struct GoalDetail {
    id: u64,
    campaign_id: u64,
    name: String,
    title: String,
    description: String,
    payout_type: String,
    payout_rate: f64,
    max_per_promoter: i64,
    payouts: u64,
}

impl From<Goal> for GoalDetail {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            campaign_id: goal.campaign_id,
            name: goal.name,
            title: goal.title,
            description: goal.description,
            payout_type: goal.payout_type,
            payout_rate: goal.payout_rate,
            max_per_promoter: goal.max_per_promoter,
            payouts: goal.payouts,
        }
    }
}

impl TableOutput for GoalDetail {
    fn print_table(&self, color: bool) {
        print_header(&format!("Goal {}: {}", self.id, self.name));
        print_field("Campaign", &self.campaign_id.to_string(), color);
        print_field("Title", or_dash(&self.title), color);
        print_field("Description", or_dash(&self.description), color);
        print_field(
            "Payout",
            &format!("{} ({})", self.payout_rate, or_dash(&self.payout_type)),
            color,
        );
        let max = if self.max_per_promoter > 0 {
            self.max_per_promoter.to_string()
        } else {
            "unlimited".to_string()
        };
        print_field("Max per promoter", &max, color);
        print_field("Payouts", &self.payouts.to_string(), color);
    }
}
