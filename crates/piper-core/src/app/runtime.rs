impl<S, C, T, M, P> PaperApp<S, C, T, M, P>
where
    S: Surface,
    C: ContentSource,
    T: TouchProvider,
    M: MotionSensor,
    P: PowerControl,
{
    /// Runs one control-loop iteration at `now_ms`.
    ///
    /// Order: sensors, requests, stream socket, message feed, orientation,
    /// touch, stream debounce, pending redraw, idle timeout. Once the sleep
    /// screen is up nothing is polled any more.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if !self.lifecycle.is_awake() {
            return self.tick_power_down(now_ms);
        }

        let accel = self.read_motion();
        let touch = self.read_touch();

        self.process_source(now_ms, |content| content.poll_request(), "request");
        self.process_source(now_ms, |content| content.poll_stream(), "stream");
        self.process_source(now_ms, |content| content.poll_feed(), "feed");

        if let Some(sample) = accel {
            self.apply_orientation(&sample, now_ms);
        }
        if let Some(sample) = touch {
            self.apply_touch(&sample, now_ms);
        }

        if self.mode == Mode::Stream
            && self.stream.redraw_due(now_ms, self.config.stream_redraw_ms)
        {
            self.request_redraw(Redraw::Stream);
        }
        let redrawn = self.flush_redraw(now_ms);

        match self.lifecycle.evaluate(now_ms) {
            PowerStep::EnterSleep => {
                self.draw_sleep_screen();
                TickResult::Sleeping
            }
            PowerStep::Stay if redrawn => TickResult::Redrawn,
            _ => TickResult::Idle,
        }
    }

    fn tick_power_down(&mut self, now_ms: u64) -> TickResult {
        match self.lifecycle.evaluate(now_ms) {
            PowerStep::PowerOff => {
                if self.power.power_off().is_err() {
                    warn!("power: power-off command failed");
                }
                TickResult::PoweredOff
            }
            PowerStep::Halted => TickResult::PoweredOff,
            PowerStep::Stay | PowerStep::EnterSleep => TickResult::Sleeping,
        }
    }

    fn read_motion(&mut self) -> Option<AccelSample> {
        match self.motion.read_accel() {
            Ok(sample) => sample,
            Err(_) => {
                warn!("motion: accelerometer read failed");
                None
            }
        }
    }

    fn read_touch(&mut self) -> Option<TouchSample> {
        match self.touch.poll_touch() {
            Ok(sample) => sample,
            Err(_) => {
                warn!("touch: poll failed");
                None
            }
        }
    }

    fn process_source<F>(&mut self, now_ms: u64, mut poll: F, source: &str)
    where
        F: FnMut(&mut C) -> Result<Option<ContentEvent>, C::Error>,
    {
        for _ in 0..MAX_EVENTS_PER_POLL {
            match poll(&mut self.content) {
                Ok(Some(event)) => self.apply_content_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("content: {} source failed", source);
                    break;
                }
            }
        }
    }
}
