//! Output for the `routes` and `check` commands. Everything here writes to stdout.

use crate::args::OutputFormat;
use autoapi::convention::Route;
use autoapi::{ConventionConfig, RouteTable};
use std::io::{self, Write};

pub fn routes(out: &mut impl Write, table: &RouteTable, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => routes_text(out, table),
        OutputFormat::Json => {
            let routes: Vec<Route<'_>> = table.routes().collect();
            serde_json::to_writer_pretty(&mut *out, &routes)?;
            writeln!(out)
        }
        OutputFormat::Full => {
            serde_json::to_writer_pretty(&mut *out, table)?;
            writeln!(out)
        }
    }
}

fn routes_text(out: &mut impl Write, table: &RouteTable) -> io::Result<()> {
    let rows: Vec<(String, Route<'_>)> =
        table.routes().map(|route| (methods(&route), route)).collect();
    let method_width = rows.iter().map(|(m, _)| m.len()).max().unwrap_or(0);
    let template_width = rows.iter().map(|(_, r)| r.template.as_str().len()).max().unwrap_or(0);

    for (methods, route) in &rows {
        writeln!(
            out,
            "{methods:<method_width$}  {:<template_width$}  {}.{}",
            route.template.as_str(),
            route.service,
            route.action
        )?;
    }
    Ok(())
}

fn methods(route: &Route<'_>) -> String {
    if route.methods.is_empty() {
        return "*".to_owned();
    }
    route.methods.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(",")
}

pub fn config(out: &mut impl Write, config: &ConventionConfig) -> io::Result<()> {
    writeln!(out, "default_http_verb  {}", config.default_http_verb())?;
    writeln!(out, "api_prefix         {}", config.api_prefix().unwrap_or("-"))?;
    writeln!(out, "default_area       {}", config.default_area().unwrap_or("-"))?;
    writeln!(out, "module_filter      {}", config.module_filter_prefix().unwrap_or("-"))?;
    writeln!(out, "service_postfixes  {}", list(config.service_postfixes()))?;
    writeln!(out, "action_postfixes   {}", list(config.action_postfixes()))?;
    writeln!(out, "body_ignored_types {}", list(config.body_binding_ignored_types()))?;
    writeln!(out, "http_verbs")?;
    for (word, verb) in config.http_verbs() {
        writeln!(out, "  {word:<16} {verb}")?;
    }
    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() { "-".to_owned() } else { values.join(", ") }
}
