use std::{env, fs, path::PathBuf};

/// A boolean switch whose long name uses dashes, as clap derive spells it.
fn flag(id: &'static str, long: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(id).long(long).help(help).action(clap::ArgAction::SetTrue)
}

/// A long option taking one value.
fn option(id: &'static str, long: &'static str, value_name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(id).long(long).value_name(value_name).help(help)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("lemmata")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Lemmata Contributors")
        .about("Extract validated keywords from RSS feeds")
        .arg(clap::arg!(-n --name <NAME> "Feed name, appended to the feed base URL"))
        .arg(flag("nouns_enabled", "nouns-enabled", "Keep only nouns").overrides_with("nouns_disabled"))
        .arg(flag("nouns_disabled", "nouns-disabled", "Keep every part of speech (default)").overrides_with("nouns_enabled"))
        .arg(flag("iqr_enabled", "iqr-enabled", "Keep only frequency outliers (IQR upper fence)").overrides_with("iqr_disabled"))
        .arg(flag("iqr_disabled", "iqr-disabled", "Keep every candidate (default)").overrides_with("iqr_enabled"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(option("user_agent", "user-agent", "UA", "Custom User-Agent for HTTP requests"))
        .arg(
            option("common_words", "common-words", "FILE", "Newline-delimited list of 1000 common words")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--workers <NUM> "Maximum number of concurrent knowledge-base lookups"))
        .arg(
            option("feed_base", "feed-base", "URL", "Base URL feed names are resolved against")
                .default_value("http://feeds.feedburner.com/"),
        )
        .arg(
            option("wiki_endpoint", "wiki-endpoint", "URL", "MediaWiki API endpoint used to validate keywords")
                .default_value("https://en.wikipedia.org/w/api.php"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lemmata", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lemmata", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lemmata", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lemmata", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
