//! Play the loading sequence.

use std::time::Instant;

use anyhow::Result;
use luxe_storefront::LoadingSequencer;

use super::SplashArgs;
use crate::context::Context;

/// Run the splash command.
pub async fn run(args: SplashArgs, ctx: &Context) -> Result<()> {
    let mut sequencer = LoadingSequencer::new(ctx.config.loading_schedule());

    if args.skip {
        sequencer.complete_loading();
    } else {
        sequencer.start();
    }

    let bar = ctx.output.loading_bar();
    loop {
        sequencer.poll();
        let state = sequencer.state();
        bar.set_position(u64::from(state.progress));
        bar.set_message(state.message.clone());

        if !state.is_loading {
            break;
        }

        match sequencer.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                tokio::time::sleep(wait).await;
            }
            None => break,
        }
    }
    bar.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(sequencer.state());
    } else {
        ctx.output.success(&sequencer.state().message);
    }
    Ok(())
}
