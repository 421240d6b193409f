/// `address` and `envelope`.
use tracing::warn;

use crate::conditions::matching::MatchArguments;
use crate::engine::{address, Arguments, Context, Engine, TestHandler};
use crate::error::Result;

pub struct AddressTest;

impl TestHandler for AddressTest {
    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        MatchArguments::parse("address", args, true)?.check_comparator(engine)
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let matching = MatchArguments::parse("address", args, true)?;
        let comparator = ctx.comparator(matching.comparator)?;

        let mut values = Vec::new();
        for name in matching.names {
            for header in ctx.mail.matching_headers(name) {
                values.extend(ctx.mail.parse_addresses(&header));
            }
        }
        address::matches(
            matching.address_part,
            comparator,
            matching.match_type,
            &values,
            matching.keys,
        )
    }
}

/// Matches against the SMTP envelope. A host that does not know the
/// envelope makes the test false.
pub struct EnvelopeTest;

impl TestHandler for EnvelopeTest {
    fn validate(&self, engine: &Engine, args: &Arguments<'_>) -> Result<()> {
        MatchArguments::parse("envelope", args, true)?.check_comparator(engine)
    }

    fn test(&self, ctx: &mut Context<'_>, args: &Arguments<'_>) -> Result<bool> {
        let matching = MatchArguments::parse("envelope", args, true)?;
        let comparator = ctx.comparator(matching.comparator)?;

        let Some(envelope) = ctx.mail.envelope() else {
            warn!("envelope test on a message without envelope information");
            return Ok(false);
        };
        let values: Vec<String> = matching
            .names
            .iter()
            .flat_map(|name| envelope.matching_envelope(name))
            .collect();
        address::matches(
            matching.address_part,
            comparator,
            matching.match_type,
            &values,
            matching.keys,
        )
    }
}
