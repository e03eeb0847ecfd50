use gloo::timers::callback::Interval;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Seconds left on the clock.
    pub remaining: u32,
    /// Full limit, for the progress bar ratio.
    pub limit: u32,
    /// Pauses the interval during the feedback stage.
    pub running: bool,
    /// Fired once per second while running.
    pub on_tick: Callback<()>,
}

/// Percent of time left, clamped so a zero limit renders an empty bar
/// rather than dividing by zero.
#[must_use]
pub fn fill_percent(remaining: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    (remaining.min(limit) * 100) / limit
}

#[function_component(Countdown)]
pub fn countdown(props: &Props) -> Html {
    // The Interval is dropped (and so cancelled) whenever `running`
    // flips or the component unmounts.
    {
        let on_tick = props.on_tick.clone();
        use_effect_with(props.running, move |running| {
            let interval = running.then(|| {
                Interval::new(1_000, move || {
                    on_tick.emit(());
                })
            });
            move || drop(interval)
        });
    }

    let percent = fill_percent(props.remaining, props.limit);
    let urgent = props.remaining <= 2;

    html! {
        <div class="countdown" role="timer" aria-live="off">
            <span class={classes!("countdown-label", urgent.then_some("countdown-urgent"))}>
                { format!("{}s", props.remaining) }
            </span>
            <progress class="countdown-bar" max="100" value={percent.to_string()} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::fill_percent;

    #[test]
    fn fill_percent_is_clamped_and_zero_safe() {
        assert_eq!(fill_percent(10, 10), 100);
        assert_eq!(fill_percent(5, 10), 50);
        assert_eq!(fill_percent(0, 10), 0);
        assert_eq!(fill_percent(15, 10), 100);
        assert_eq!(fill_percent(3, 0), 0);
    }
}
