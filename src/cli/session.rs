//! Session - the menu loop.
//!
//! All state lives in the [`Session`] (its input and output handles) or is
//! passed in by the caller (the index). Nothing is global, so a session can
//! be driven from stdin or from a byte buffer in tests.

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::cli::{BidLine, Command};
use crate::common::{Error, Result};
use crate::index::OrderedIndex;
use crate::record::{Bid, BidId};

const MENU: &str = "Menu:
  1. Add Bid
  2. Display All Bids
  3. Find Bid
  4. Remove Bid
  9. Exit
";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An interactive session reading commands from `I` and writing to `O`.
///
/// # Usage
/// ```
/// use bidtree::cli::Session;
/// use bidtree::OrderedIndex;
///
/// let input = "1\n7\nLamp\nGeneral\n12.5\n2\n9\n";
/// let mut output = Vec::new();
/// let mut index = OrderedIndex::new();
///
/// Session::new(input.as_bytes(), &mut output).run(&mut index).unwrap();
///
/// let text = String::from_utf8(output).unwrap();
/// assert!(text.contains("7: Lamp | 12.5 | General"));
/// assert!(text.ends_with("Goodbye.\n"));
/// ```
pub struct Session<I, O> {
    input: I,
    output: O,
    print_stats: bool,
}

impl<I: BufRead, O: Write> Session<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            print_stats: false,
        }
    }

    /// Print the index statistics line before saying goodbye.
    pub fn with_stats(mut self, print_stats: bool) -> Self {
        self.print_stats = print_stats;
        self
    }

    /// Give back the output handle.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// Bad menu choices and bad amounts are reported and the loop goes on.
    ///
    /// # Errors
    /// - `Error::Io` if reading input or writing output fails
    pub fn run(&mut self, index: &mut OrderedIndex<Bid>) -> Result<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            self.prompt("Enter choice: ")?;

            let Some(line) = self.read_line()? else {
                debug!("input closed at menu prompt");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let outcome = line
                .parse::<Command>()
                .and_then(|command| self.dispatch(command, index));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err @ (Error::InvalidChoice(_) | Error::InvalidAmount(_))) => {
                    writeln!(self.output, "{}", err)?;
                }
                Err(Error::UnexpectedEof(field)) => {
                    warn!("input closed while reading {}", field);
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let stats = index.stats().snapshot();
        info!("session finished with {} bids; {}", index.len(), stats);
        if self.print_stats {
            writeln!(self.output, "{}", stats)?;
        }
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    /// Carry out one command against `index`.
    pub fn dispatch(&mut self, command: Command, index: &mut OrderedIndex<Bid>) -> Result<Flow> {
        debug!("dispatching {:?}", command);

        match command {
            Command::AddBid => {
                let bid = self.read_bid()?;
                index.insert(bid);
            }
            Command::DisplayAll => {
                for bid in index.in_order() {
                    writeln!(self.output, "{}", BidLine(bid))?;
                }
            }
            Command::FindBid => {
                self.prompt("Enter Bid ID to search: ")?;
                let key = BidId::new(self.read_token("bid id")?);
                match index.find(&key) {
                    Some(bid) => writeln!(self.output, "{}", BidLine(bid))?,
                    None => writeln!(self.output, "Bid ID {} not found.", key)?,
                }
            }
            Command::RemoveBid => {
                self.prompt("Enter Bid ID to remove: ")?;
                let key = BidId::new(self.read_token("bid id")?);
                if index.remove(&key).is_none() {
                    debug!("remove: bid {} was not present", key);
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    // ========================================================================
    // Internal: input
    // ========================================================================

    fn prompt(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Next line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Next line, failing at end of input.
    fn read_field(&mut self, field: &'static str) -> Result<String> {
        self.read_line()?.ok_or(Error::UnexpectedEof(field))
    }

    /// First whitespace-separated word, skipping blank lines.
    fn read_token(&mut self, field: &'static str) -> Result<String> {
        loop {
            let line = self.read_field(field)?;
            if let Some(token) = line.split_whitespace().next() {
                return Ok(token.to_string());
            }
        }
    }

    fn read_bid(&mut self) -> Result<Bid> {
        self.prompt("Enter Bid ID: ")?;
        let bid_id = self.read_token("bid id")?;
        self.prompt("Enter Title: ")?;
        let title = self.read_field("title")?;
        self.prompt("Enter Fund: ")?;
        let fund = self.read_field("fund")?;
        self.prompt("Enter Amount: ")?;
        let raw_amount = self.read_token("amount")?;

        let amount = raw_amount
            .parse::<f64>()
            .map_err(|_| Error::InvalidAmount(raw_amount.clone()))?;

        Ok(Bid::new(bid_id, title, fund, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str, index: &mut OrderedIndex<Bid>) -> String {
        let mut output = Vec::new();
        Session::new(script.as_bytes(), &mut output)
            .run(index)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        let mut index = OrderedIndex::new();
        let out = run_script("9\n", &mut index);
        assert!(out.starts_with("Menu:\n  1. Add Bid\n"));
        assert!(out.ends_with("Enter choice: Goodbye.\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut index = OrderedIndex::new();
        let out = run_script("", &mut index);
        assert!(out.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_add_reads_all_fields() {
        let mut index = OrderedIndex::new();
        run_script("1\n  42 extra\nOffice Chair\nGeneral Fund\n27.5\n9\n", &mut index);

        let bid = index.find(&BidId::from("42")).unwrap();
        assert_eq!(bid.title, "Office Chair");
        assert_eq!(bid.fund, "General Fund");
        assert_eq!(bid.amount, 27.5);
    }

    #[test]
    fn test_bad_amount_is_reported() {
        let mut index = OrderedIndex::new();
        let out = run_script("1\n1\nT\nF\nlots\n9\n", &mut index);
        assert!(out.contains("Invalid amount: lots\n"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_unknown_choice_is_reported() {
        let mut index = OrderedIndex::new();
        let out = run_script("5\nx\n9\n", &mut index);
        assert!(out.contains("Invalid choice: 5\n"));
        assert!(out.contains("Invalid choice: x\n"));
        assert!(out.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_eof_mid_add_ends_session() {
        let mut index = OrderedIndex::new();
        let out = run_script("1\n5\nTitle only\n", &mut index);
        assert!(out.ends_with("Goodbye.\n"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_dispatch_exit() {
        let mut index = OrderedIndex::new();
        let mut session = Session::new(&b""[..], Vec::new());
        assert_eq!(session.dispatch(Command::Exit, &mut index).unwrap(), Flow::Exit);
        assert_eq!(
            session.dispatch(Command::DisplayAll, &mut index).unwrap(),
            Flow::Continue
        );
        assert!(session.into_output().is_empty());
    }

    #[test]
    fn test_stats_line() {
        let mut index = OrderedIndex::new();
        let mut output = Vec::new();
        Session::new(&b"3\n1\n9\n"[..], &mut output)
            .with_stats(true)
            .run(&mut index)
            .unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Bid ID 1 not found.\n"));
        assert!(out.contains("lookups: 1"));
    }
}
