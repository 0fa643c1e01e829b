use naming_core::{ContextConfig, Token};
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Offset")]
    offset: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Lexeme")]
    lexeme: String,
    #[tabled(rename = "Capture")]
    capture: String,
}

impl From<&Token> for TokenRow {
    fn from(token: &Token) -> Self {
        Self {
            offset: token.offset,
            kind: token.kind.to_string(),
            lexeme: token.lexeme.clone(),
            capture: token.capture.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn run(config: &ContextConfig, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokenizer = config.tokenizer()?;
    let tokens = tokenizer.tokenize(name)?;

    let rows: Vec<TokenRow> = tokens.iter().map(TokenRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{}", table);
    Ok(())
}
