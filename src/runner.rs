use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Tokenizes `source`, prints one token per line and reports any lexical
/// diagnostics. Returns whether the source was free of diagnostics.
pub fn run(source: &str, filename: Option<&str>) -> bool {
    let mut lexer = Lexer::new(source);

    loop {
        let token = lexer.next_token();
        println!("{}", token);
        if token.kind == TokenKind::Eof {
            break;
        }
    }

    for diagnostic in lexer.diagnostics() {
        diagnostic.report(source, filename);
    }

    tracing::debug!(
        file = filename.unwrap_or("<repl>"),
        diagnostics = lexer.diagnostics().len(),
        "tokenized"
    );
    lexer.diagnostics().is_empty()
}
