//! A terminal stand-in for a real chat network: replies are printed to
//! stdout and keyboards are rendered as menus the user can answer by
//! typing a label or a `cb <data>` line.

use console::style;
use mixtape::error::Result;
use mixtape::keyboard::Keyboard;
use mixtape::transport::{ChatId, Transport};

pub struct ConsoleTransport {
    username: String,
}

impl ConsoleTransport {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl Transport for ConsoleTransport {
    fn send_text(&mut self, _chat: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<()> {
        println!("{}", text);
        match keyboard {
            Some(Keyboard::Reply(rows)) => {
                for row in rows {
                    let labels: Vec<String> =
                        row.iter().map(|label| format!("[{}]", label)).collect();
                    println!("  {}", style(labels.join(" ")).dim());
                }
            }
            Some(Keyboard::Inline(rows)) => {
                for row in rows {
                    for button in row {
                        println!(
                            "  {} {}",
                            style(&button.label).bold(),
                            style(format!("(cb {})", button.action)).dim()
                        );
                    }
                }
            }
            None => {}
        }
        Ok(())
    }

    fn send_audio(&mut self, _chat: ChatId, file_id: &str, caption: Option<&str>) -> Result<()> {
        match caption {
            Some(caption) => println!("♪ audio {} ({})", file_id, caption),
            None => println!("♪ audio {}", file_id),
        }
        Ok(())
    }

    fn username(&mut self) -> Result<String> {
        Ok(self.username.clone())
    }
}
