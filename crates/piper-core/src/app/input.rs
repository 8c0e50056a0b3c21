impl<S, C, T, M, P> PaperApp<S, C, T, M, P>
where
    S: Surface,
    C: ContentSource,
    T: TouchProvider,
    M: MotionSensor,
    P: PowerControl,
{
    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            mode: self.mode,
            ui_visible: self.ui_visible,
            screen_w: self.surface.width(),
            screen_h: self.surface.height(),
            page_index: self.document.page_index(),
            page_count: self.document.page_count(),
            font_scale: self.font_scale,
        }
    }

    fn apply_touch(&mut self, sample: &TouchSample, now_ms: u64) {
        if self.mode == Mode::None {
            return;
        }
        self.lifecycle.record_activity(now_ms);

        let ctx = self.gesture_context();
        if let Some(action) = self.gestures.accept(sample, &ctx, now_ms) {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: NavAction) {
        let changed = match action {
            NavAction::NextPage => self.document.next_page(),
            NavAction::PrevPage => self.document.previous_page(),
            NavAction::FirstPage => self.document.first_page(),
            NavAction::LastPage => self.document.last_page(),
            NavAction::FontUp => self.change_font(self.font_scale.larger()),
            NavAction::FontDown => self.change_font(self.font_scale.smaller()),
            NavAction::ToggleUi => {
                self.ui_visible = !self.ui_visible;
                if self.mode.is_paged() {
                    self.reflow();
                }
                true
            }
        };

        debug!(
            "touch: action={:?} changed={} page={}/{} scale={} ui={}",
            action,
            changed,
            self.document.page_index().saturating_add(1),
            self.document.page_count(),
            self.font_scale.get(),
            self.ui_visible
        );
        if changed {
            self.request_view_redraw();
        }
    }

    fn change_font(&mut self, scale: Option<FontScale>) -> bool {
        let Some(scale) = scale else {
            return false;
        };
        self.font_scale = scale;
        if self.mode.is_paged() && self.document.set_font_scale(scale) {
            self.reflow();
        }
        true
    }

    fn apply_orientation(&mut self, sample: &AccelSample, now_ms: u64) {
        let Some(rotation) = self.orientation.update(sample, now_ms) else {
            return;
        };

        info!("orientation: rotation={}", rotation.index());
        self.surface.set_rotation(rotation);
        if self.mode.is_paged() {
            self.reflow();
        }
        self.request_redraw(Redraw::Full);
    }
}
