//
//  tonicpow
//  cli/rate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::api::resources::{Rate, RateService};
use crate::output::{format_satoshis, or_dash, print_field, print_header, TableOutput};

use super::GlobalOptions;

/// Show the current exchange rate for a currency
#[derive(Args, Debug)]
pub struct RateCommand {
    /// Currency code (usd, eur, bsv, ...)
    #[arg(default_value = "usd")]
    pub currency: String,

    /// Convert this amount of the currency to satoshis
    #[arg(long, short = 'a', default_value = "0")]
    pub amount: f64,
}

impl RateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client().await?;
        let rate = client.get_current_rate(&self.currency, self.amount).await?;
        global.output().write(&RateDisplay::from(rate))
    }
}

#[derive(Debug, Serialize)]
struct RateDisplay {
    currency: String,
    currency_name: String,
    price: f64,
    currency_amount: f64,
    satoshi_amount: i64,
    rate_last_updated: String,
}

impl From<Rate> for RateDisplay {
    fn from(rate: Rate) -> Self {
        Self {
            currency: rate.currency,
            currency_name: rate.currency_name,
            price: rate.price,
            currency_amount: rate.currency_amount,
            satoshi_amount: rate.satoshi_amount,
            rate_last_updated: rate.rate_last_updated,
        }
    }
}

impl TableOutput for RateDisplay {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} rate", self.currency.to_uppercase()));
        print_field("Currency", or_dash(&self.currency_name), color);
        print_field("Price", &self.price.to_string(), color);
        if self.currency_amount > 0.0 {
            print_field(
                "Converted",
                &format!(
                    "{} {} = {}",
                    self.currency_amount,
                    self.currency,
                    format_satoshis(self.satoshi_amount)
                ),
                color,
            );
        }
        print_field("Last updated", or_dash(&self.rate_last_updated), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        rate: RateCommand,
    }

    #[test]
    fn test_rate_args() {
        let parsed = Harness::try_parse_from(["rate", "eur", "--amount", "0.01"]).unwrap();
        assert_eq!(parsed.rate.currency, "eur");
        assert_eq!(parsed.rate.amount, 0.01);

        let parsed = Harness::try_parse_from(["rate"]).unwrap();
        assert_eq!(parsed.rate.currency, "usd");
        assert_eq!(parsed.rate.amount, 0.0);
    }
}
