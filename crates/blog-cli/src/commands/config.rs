use blog_forms::Config;
use colored::Colorize;

pub fn execute(config: &Config) {
    println!("{}", "Configuration".bold());
    println!("  database.uri   {}", config.database.redacted_uri());
    println!("  mail.server    {}", config.mail.server);
    println!("  mail.port      {}", config.mail.port);
    println!("  mail.use_tls   {}", config.mail.use_tls);
    println!("  mail.username  {}", config.mail.username.as_deref().unwrap_or("<unset>"));
    println!("  mail.password  {}", set_or_unset(config.mail.password.is_some()));
    println!("  secret_key     {}", set_or_unset(config.secret_key().is_ok()));
}

fn set_or_unset(set: bool) -> colored::ColoredString {
    if set {
        "<redacted>".green()
    } else {
        "<unset>".yellow()
    }
}
