use log::{debug, warn};

use super::ast::{Command, CommandSequence, OutputRedirection};
use super::lexer::{Lexer, Separator, Token};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
        }
    }

    /// Split the line into commands. `>` closes the current command and
    /// names its output file; `|` closes it without producing a command.
    /// A trailing `>` only affects the command it closes.
    pub fn parse(&mut self) -> CommandSequence<'a> {
        self.lexer.restart();

        let mut commands = CommandSequence::new();
        let mut args: Vec<&'a str> = Vec::new();

        while let Some(token) = self.lexer.next_token() {
            match token {
                Token::Literal(word) => args.push(word),
                Token::Separator(Separator::Redirect) => {
                    let output = match self.lexer.next_raw() {
                        Some(path) => OutputRedirection::ToFile(path),
                        None => OutputRedirection::MissingTarget,
                    };
                    let closed = std::mem::take(&mut args);
                    if closed.is_empty() {
                        debug!("重定向前没有命令, 忽略: {:?}", output);
                        continue;
                    }
                    commands.push(Command::new(closed, output));
                }
                Token::Separator(Separator::Pipe) => {
                    // pipelines are not wired up; the pending words are dropped
                    warn!("暂不支持管道, 丢弃: {:?}", args);
                    args.clear();
                }
            }
        }

        if !args.is_empty() {
            commands.push(Command::new(args, OutputRedirection::Inherit));
        }

        debug!("解析结果: {:?}", commands);
        commands
    }
}

/// Shorthand for `Parser::new(line).parse()`.
pub fn parse_line(line: &str) -> CommandSequence<'_> {
    Parser::new(line).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_command() {
        let commands = parse_line("ls -la");
        assert_eq!(
            commands,
            vec![Command::new(vec!["ls", "-la"], OutputRedirection::Inherit)]
        );
    }

    #[test]
    fn test_redirection() {
        let commands = parse_line("echo hi > out.txt");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].args, vec!["echo", "hi"]);
        assert_eq!(commands[0].output, OutputRedirection::ToFile("out.txt"));
    }

    #[test]
    fn test_words_after_redirection_start_new_command() {
        let commands = parse_line("echo a > a.txt echo b");
        assert_eq!(
            commands,
            vec![
                Command::new(vec!["echo", "a"], OutputRedirection::ToFile("a.txt")),
                Command::new(vec!["echo", "b"], OutputRedirection::Inherit),
            ]
        );
    }

    #[test]
    fn test_redirection_target_is_verbatim() {
        let commands = parse_line("echo hi > | wc");
        assert_eq!(
            commands,
            vec![
                Command::new(vec!["echo", "hi"], OutputRedirection::ToFile("|")),
                Command::new(vec!["wc"], OutputRedirection::Inherit),
            ]
        );
    }

    #[test]
    fn test_missing_redirection_target() {
        assert_eq!(
            parse_line("echo hi >"),
            vec![Command::new(vec!["echo", "hi"], OutputRedirection::MissingTarget)]
        );
    }

    #[test]
    fn test_trailing_redirect_keeps_earlier_commands() {
        assert_eq!(
            parse_line("echo a > f echo b >"),
            vec![
                Command::new(vec!["echo", "a"], OutputRedirection::ToFile("f")),
                Command::new(vec!["echo", "b"], OutputRedirection::MissingTarget),
            ]
        );
        assert_eq!(
            parse_line("echo a > f >"),
            vec![Command::new(vec!["echo", "a"], OutputRedirection::ToFile("f"))]
        );
    }

    #[test]
    fn test_redirection_without_command() {
        assert!(parse_line("> out.txt").is_empty());
    }

    #[test]
    fn test_pipe_is_not_executed() {
        let commands = parse_line("ls -l | grep foo");
        assert_eq!(
            commands,
            vec![Command::new(vec!["grep", "foo"], OutputRedirection::Inherit)]
        );

        assert!(parse_line("ls |").is_empty());
    }

    #[test]
    fn test_blank_lines() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("   ").is_empty());
        assert!(parse_line("\t\n").is_empty());
    }

    #[test]
    fn test_parse_is_repeatable() {
        let line = String::from("echo x > f.txt cat f.txt");
        let copy = line.clone();

        let mut parser = Parser::new(&line);
        let first = parser.parse();
        let second = parser.parse();
        assert_eq!(first, second);
        assert_eq!(first, parse_line(&copy));
    }

    #[test]
    fn test_commands_are_never_empty() {
        for line in ["a > x", "> x a", "| a |", "a | > x", "a b c"] {
            for cmd in parse_line(line) {
                assert!(!cmd.args.is_empty(), "empty command from {:?}", line);
            }
        }
    }
}
