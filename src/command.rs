//! The textual command surface of the monitor core
//!
//! Commands arrive as whitespace-tokenized argument vectors, return an
//! integer status and append human-readable text to an output buffer

use crate::{
    disjoin::disjoin_rects,
    error::{status, Error},
    geometry::Rectangle,
    hooks::{DisplayServer, Frames, Hooks},
    manager::WindowManager,
};
use std::fmt::Write;

/// Outcome of a single command
type CmdResult = Result<(), Error>;

/// Parse a RECT argument
fn parse_rect(s: &str) -> Result<Rectangle, Error> {
    s.parse()
}

/// Parse a signed numeric argument
fn parse_i32(s: &str) -> Result<i32, Error> {
    s.parse().map_err(|_| Error::InvalidNumber(s.to_owned()))
}

/// Parse up to four optional pad arguments in `UP RIGHT DOWN LEFT` order.
/// Missing or empty positions leave the corresponding pad untouched
fn parse_pads(args: &[&str]) -> Result<[Option<u32>; 4], Error> {
    let mut pads = [None; 4];

    for (slot, arg) in pads.iter_mut().zip(args) {
        if arg.is_empty() {
            continue;
        }
        *slot = Some(
            arg.parse()
                .map_err(|_| Error::InvalidNumber((*arg).to_owned()))?,
        );
    }

    Ok(pads)
}

impl<F: Frames, D: DisplayServer, H: Hooks> WindowManager<F, D, H> {
    /// Run one command, appending its text output to `output` and returning
    /// the wire status code
    pub(crate) fn run_command(&mut self, argv: &[&str], output: &mut String) -> i32 {
        match self.dispatch(argv, output) {
            Ok(()) => status::SUCCESS,
            Err(e) => {
                let _ = writeln!(output, "{}", e);
                e.status()
            },
        }
    }

    /// Route the argument vector to its command
    fn dispatch(&mut self, argv: &[&str], output: &mut String) -> CmdResult {
        let (&command, args) = argv
            .split_first()
            .ok_or(Error::MissingArgument("no command given"))?;

        match command {
            "list_monitors" => self.list_monitors(output),
            "add_monitor" => self.add_monitor_command(args),
            "remove_monitor" => self.remove_monitor_command(args),
            "move_monitor" => self.move_monitor_command(args),
            "monitor_rect" => self.monitor_rect_command(args, output),
            "monitor_set_pad" => self.monitor_set_pad_command(args),
            "set_monitor_rects" => self.set_monitor_rects_command(args),
            "disjoin_rects" => Self::disjoin_rects_command(args, output),
            "monitor_focus" => self.monitor_focus_command(args),
            "monitor_cycle" => self.monitor_cycle_command(args),
            "monitor_set_tag" => self.monitor_set_tag_command(args),
            "monitor_set_tag_by_index" => self.monitor_set_tag_by_index_command(args),
            "monitors_lock" => {
                self.lock();
                Ok(())
            },
            "monitors_unlock" => {
                self.unlock();
                Ok(())
            },
            other => Err(Error::UnknownCommand(other.to_owned())),
        }
    }

    /// `list_monitors` — one line per monitor
    fn list_monitors(&self, output: &mut String) -> CmdResult {
        for (i, monitor) in self.monitors.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}: {} with tag \"{}\"{}",
                i,
                monitor.rect,
                self.frames.name(monitor.tag),
                if i == self.monitors.current_index() {
                    " [FOCUS]"
                } else {
                    ""
                }
            );
        }

        Ok(())
    }

    /// `add_monitor RECT [TAG [PADUP [PADRIGHT [PADDOWN [PADLEFT]]]]]` — an
    /// empty or missing TAG picks any tag not shown anywhere
    fn add_monitor_command(&mut self, args: &[&str]) -> CmdResult {
        let rect = parse_rect(args.first().ok_or(Error::MissingArgument(
            "usage: add_monitor RECT [TAG [PADS...]]",
        ))?)?;

        let tag = match args.get(1) {
            None | Some(&"") => self
                .frames
                .find_unused(&self.monitors.bound_tags())
                .ok_or(Error::NoFreeTag)?,
            Some(name) => self
                .frames
                .find_by_name(name)
                .ok_or_else(|| Error::NoSuchTag((*name).to_owned()))?,
        };

        let pads = parse_pads(args.get(2..).unwrap_or(&[]))?;
        self.add_monitor(rect, tag, pads)?;

        Ok(())
    }

    /// `remove_monitor INDEX`
    fn remove_monitor_command(&mut self, args: &[&str]) -> CmdResult {
        let index = parse_i32(
            args.first()
                .ok_or(Error::MissingArgument("usage: remove_monitor INDEX"))?,
        )?;

        self.remove_monitor(index)
    }

    /// `move_monitor INDEX RECT [PADS...]`
    fn move_monitor_command(&mut self, args: &[&str]) -> CmdResult {
        match args {
            [index, rect, pads @ ..] => self.move_monitor(
                parse_i32(index)?,
                parse_rect(rect)?,
                parse_pads(pads)?,
            ),
            _ => Err(Error::MissingArgument(
                "usage: move_monitor INDEX RECT [PADS...]",
            )),
        }
    }

    /// `monitor_rect [-p] [INDEX]` — prints `X Y W H`, padded with `-p`
    fn monitor_rect_command(&self, args: &[&str], output: &mut String) -> CmdResult {
        let (with_pad, index_arg) = match args {
            [] => (false, None),
            ["-p"] => (true, None),
            [index] => (false, Some(*index)),
            ["-p", index] => (true, Some(*index)),
            [flag, ..] => return Err(Error::InvalidArgument((*flag).to_owned())),
        };

        let monitor = match index_arg {
            Some(arg) => {
                let index = self.checked_index(parse_i32(arg)?)?;
                &self.monitors[index]
            },
            None => self
                .monitors
                .current()
                .ok_or(Error::MissingArgument("no monitor configured"))?,
        };

        let rect = if with_pad {
            monitor.padded_rect()
        } else {
            monitor.rect
        };
        let _ = writeln!(
            output,
            "{} {} {} {}",
            rect.point.x, rect.point.y, rect.dimension.width, rect.dimension.height
        );

        Ok(())
    }

    /// `monitor_set_pad INDEX [PADUP [PADRIGHT [PADDOWN [PADLEFT]]]]`
    fn monitor_set_pad_command(&mut self, args: &[&str]) -> CmdResult {
        match args {
            [index, pads @ ..] => self.set_monitor_pads(parse_i32(index)?, parse_pads(pads)?),
            [] => Err(Error::MissingArgument(
                "usage: monitor_set_pad INDEX [PADS...]",
            )),
        }
    }

    /// `set_monitor_rects RECT...`
    fn set_monitor_rects_command(&mut self, args: &[&str]) -> CmdResult {
        let rects = args
            .iter()
            .map(|s| parse_rect(s))
            .collect::<Result<Vec<_>, _>>()?;

        self.set_monitor_rects(&rects)
    }

    /// `disjoin_rects RECT...` — print the disjoint cover of the arguments
    fn disjoin_rects_command(args: &[&str], output: &mut String) -> CmdResult {
        if args.is_empty() {
            return Err(Error::MissingArgument("at least one rect is required"));
        }

        let rects = args
            .iter()
            .map(|s| parse_rect(s))
            .collect::<Result<Vec<_>, _>>()?;

        for rect in disjoin_rects(&rects) {
            let _ = writeln!(output, "{}", rect);
        }

        Ok(())
    }

    /// `monitor_focus INDEX`
    fn monitor_focus_command(&mut self, args: &[&str]) -> CmdResult {
        let index = parse_i32(
            args.first()
                .ok_or(Error::MissingArgument("usage: monitor_focus INDEX"))?,
        )?;

        self.focus_monitor(index);
        Ok(())
    }

    /// `monitor_cycle [DELTA]` — DELTA defaults to 1
    fn monitor_cycle_command(&mut self, args: &[&str]) -> CmdResult {
        let delta = match args.first() {
            Some(arg) => parse_i32(arg)?,
            None => 1,
        };

        self.cycle_monitor(delta);
        Ok(())
    }

    /// `monitor_set_tag TAGNAME` — show the named tag on the focused monitor
    fn monitor_set_tag_command(&mut self, args: &[&str]) -> CmdResult {
        let name = args
            .first()
            .ok_or(Error::MissingArgument("usage: monitor_set_tag TAGNAME"))?;
        let tag = self
            .frames
            .find_by_name(name)
            .ok_or_else(|| Error::NoSuchTag((*name).to_owned()))?;

        self.set_tag(self.monitors.current_index(), tag);
        Ok(())
    }

    /// `monitor_set_tag_by_index INDEX [--skip-visible]`
    fn monitor_set_tag_by_index_command(&mut self, args: &[&str]) -> CmdResult {
        let arg = args.first().ok_or(Error::MissingArgument(
            "usage: monitor_set_tag_by_index INDEX [--skip-visible]",
        ))?;
        let index = arg
            .parse::<usize>()
            .map_err(|_| Error::InvalidNumber((*arg).to_owned()))?;
        let skip_visible = args.get(1) == Some(&"--skip-visible");

        let tag = self
            .frames
            .by_index(index, skip_visible, &self.monitors.bound_tags())
            .ok_or_else(|| Error::NoSuchTag((*arg).to_owned()))?;

        self.set_tag(self.monitors.current_index(), tag);
        Ok(())
    }
}
