//! The interactive arbitration loop.
//!
//! One prompt per halt: the operator advances one or both sides, or
//! inspects either side's current node, parent, or previously consumed
//! node first. Unknown input reprints the menu and re-prompts; only an
//! advance command returns control to the synchronizer.

use std::io::{self, BufRead, Write};

use lockstep_core::{
    ArbitrationContext, Decision, DecisionSource, InspectTarget, Side, SyncError,
};

/// A [`DecisionSource`] reading line-oriented commands.
///
/// Generic over its streams so tests can substitute buffers for stdio.
pub struct InteractiveDecisions<R, W> {
    input: R,
    output: W,
}

impl InteractiveDecisions<io::StdinLock<'static>, io::Stdout> {
    /// Creates the loop over process stdin/stdout.
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl<R, W> InteractiveDecisions<R, W> {
    #[cfg(test)]
    fn over(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DecisionSource for InteractiveDecisions<R, W> {
    fn decide(&mut self, ctx: &ArbitrationContext<'_>) -> Result<Decision, SyncError> {
        writeln!(self.output)?;
        writeln!(self.output, "Round {}: {}", ctx.round(), ctx.classification())?;
        for side in [Side::Left, Side::Right] {
            self.show_summary(ctx, side)?;
        }

        loop {
            write!(self.output, "Select: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SyncError::DecisionSourceClosed);
            }

            match line.trim() {
                "1" => return Ok(Decision::AdvanceLeft),
                "2" => return Ok(Decision::AdvanceRight),
                "3" => return Ok(Decision::AdvanceBoth),
                "d1" => self.show(ctx, Side::Left, InspectTarget::Current)?,
                "d2" => self.show(ctx, Side::Right, InspectTarget::Current)?,
                "p1" => self.show(ctx, Side::Left, InspectTarget::Parent)?,
                "p2" => self.show(ctx, Side::Right, InspectTarget::Parent)?,
                "l1" => self.show(ctx, Side::Left, InspectTarget::Previous)?,
                "l2" => self.show(ctx, Side::Right, InspectTarget::Previous)?,
                _ => self.menu()?,
            }
        }
    }
}

impl<R, W: Write> InteractiveDecisions<R, W> {
    fn show_summary(&mut self, ctx: &ArbitrationContext<'_>, side: Side) -> Result<(), SyncError> {
        if let (Some(kind), Some(line)) = (
            ctx.kind(side, InspectTarget::Current),
            ctx.render(side, InspectTarget::Current),
        ) {
            writeln!(self.output, "Snippet {side}: {kind}: {line}")?;
        }
        Ok(())
    }

    fn show(
        &mut self,
        ctx: &ArbitrationContext<'_>,
        side: Side,
        target: InspectTarget,
    ) -> Result<(), SyncError> {
        let label = match target {
            InspectTarget::Current => "node",
            InspectTarget::Parent => "parent",
            InspectTarget::Previous => "last node",
        };
        match (ctx.kind(side, target), ctx.render_full(side, target)) {
            (Some(kind), Some(line)) => {
                writeln!(
                    self.output,
                    "[{side}] {label} {kind} - {}",
                    ctx.path(side).display()
                )?;
                writeln!(self.output, "{line}")?;
                writeln!(self.output)?;
            }
            _ => {
                writeln!(self.output, "[{side}] no {label} at this position")?;
            }
        }
        Ok(())
    }

    fn menu(&mut self) -> Result<(), SyncError> {
        writeln!(self.output, "Please select one of the following:")?;
        writeln!(self.output, " '1'  - Advance node 1")?;
        writeln!(self.output, " '2'  - Advance node 2")?;
        writeln!(self.output, " '3'  - Advance node 1 AND node 2")?;
        writeln!(self.output, " 'd1' - Display node 1")?;
        writeln!(self.output, " 'd2' - Display node 2")?;
        writeln!(self.output, " 'p1' - Display parent 1")?;
        writeln!(self.output, " 'p2' - Display parent 2")?;
        writeln!(self.output, " 'l1' - Display last node 1")?;
        writeln!(self.output, " 'l2' - Display last node 2")?;
        Ok(())
    }
}
