use super::Host;
use super::common::write_json;
use crate::Result;
use crate::ratings::rating_criteria;

/// Print the rules behind every rating category
///
/// # Errors
///
/// Returns an error if the output cannot be written
pub fn print_criteria<H: Host>(host: &mut H) -> Result<()> {
    write_json(host, rating_criteria())
}
