use crate::analyzer::compliance::{OutputFormat, builtin_rule_set, format_rules_to_string};

pub fn handle_rules(format: OutputFormat) -> crate::Result<()> {
    print!("{}", format_rules_to_string(builtin_rule_set(), format));
    Ok(())
}
