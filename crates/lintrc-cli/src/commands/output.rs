//! Effective-rule-set output formatting.

use anyhow::Result;
use lintrc_core::EffectiveRuleSet;

use crate::OutputFormat;

/// Prints an effective rule set in the requested format.
pub fn print_effective(set: &EffectiveRuleSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(set),
        OutputFormat::Json => print_json(set)?,
        OutputFormat::Compact => print_compact(set),
    }
    Ok(())
}

fn print_text(set: &EffectiveRuleSet) {
    println!("source type: {}", set.source_type());
    println!("rules ({} configured, {} enabled):", set.len(), set.enabled().count());
    for (name, spec) in set.iter() {
        if spec.options().is_empty() {
            println!("  {name}: {}", spec.severity());
        } else {
            let options: Vec<String> = spec
                .options()
                .iter()
                .map(std::string::ToString::to_string)
                .collect();
            println!("  {name}: {} {}", spec.severity(), options.join(" "));
        }
    }
}

fn print_json(set: &EffectiveRuleSet) -> Result<()> {
    let rules: serde_json::Map<String, serde_json::Value> = set
        .iter()
        .map(|(name, spec)| {
            let mut entry = vec![serde_json::Value::String(spec.severity().to_string())];
            for option in spec.options() {
                entry.push(serde_json::to_value(option)?);
            }
            Ok((name.to_string(), serde_json::Value::Array(entry)))
        })
        .collect::<Result<_>>()?;

    let doc = serde_json::json!({
        "sourceType": set.source_type().to_string(),
        "rules": rules,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn print_compact(set: &EffectiveRuleSet) {
    for (name, spec) in set.enabled() {
        println!("{name}={}", spec.severity());
    }
}
