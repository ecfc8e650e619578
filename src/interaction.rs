//! Hot/active widget identity.
//!
//! Widgets are not retained, so hover and press ownership are tracked by id.
//! `hot` is rebuilt every frame by whichever widget last reported hover;
//! `active` survives frames until the pointer button is released.

/// Stable identity of a widget across frames, chosen by the caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(u64);

impl WidgetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derive the id of the `index`-th child of a repeated widget, such as
    /// one row of a tree listing.
    pub fn child(self, index: usize) -> Self {
        // FNV-1a style mix keeps siblings of different parents apart
        let mixed = (self.0 ^ 0xcbf2_9ce4_8422_2325).wrapping_mul(0x0100_0000_01b3);
        Self(mixed ^ (index as u64 + 1))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Who currently owns the pointer press.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Active {
    #[default]
    None,
    Widget(WidgetId),
    /// The press started over no widget; nothing may claim it until release
    DeadSpace,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Interaction {
    hot: Option<WidgetId>,
    active: Active,
    /// The current owner claimed the press during this frame
    claimed_this_frame: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.hot = None;
        self.claimed_this_frame = false;
    }

    /// Finalise the frame's press state.
    ///
    /// Releasing the button clears any owner. A press that nobody claimed
    /// this frame is captured by dead space until release, so dragging from
    /// empty space never lands on a widget.
    pub fn end_frame(&mut self, button_down: bool) {
        if !button_down {
            if self.active != Active::None {
                log::trace!("Press released by {:?}", self.active);
            }
            self.active = Active::None;
        } else if self.active == Active::None {
            log::trace!("Press captured by dead space");
            self.active = Active::DeadSpace;
        }
    }

    /// Called by a widget whose bounds and visible clip contain the pointer.
    /// The last caller in a frame wins.
    pub fn report_hover(&mut self, id: WidgetId) {
        self.hot = Some(id);
    }

    /// Try to take ownership of the press for `id`.
    ///
    /// Succeeds when nothing owns the press yet. Within the frame the press
    /// is first claimed, a later widget may take it over, matching the
    /// last-write-wins rule of hover so overlapping widgets agree on a
    /// winner. From the next frame on the owner keeps the press until
    /// release, even if the pointer leaves its bounds.
    pub fn try_claim_active(&mut self, id: WidgetId, button_down: bool) -> bool {
        if !button_down {
            return false;
        }
        let claimable = match self.active {
            Active::None => true,
            Active::Widget(owner) => owner == id || self.claimed_this_frame,
            Active::DeadSpace => false,
        };
        if claimable && self.active != Active::Widget(id) {
            log::trace!("Press claimed by {:?}", id);
            self.active = Active::Widget(id);
            self.claimed_this_frame = true;
        }
        claimable
    }

    pub fn is_hot(&self, id: WidgetId) -> bool {
        self.hot == Some(id)
    }

    pub fn is_active(&self, id: WidgetId) -> bool {
        self.active == Active::Widget(id)
    }

    /// True when `id` owns a press claimed on an earlier frame.
    ///
    /// On the frame a press is first claimed a later widget may still take
    /// it over, so ownership only settles once that frame has ended.
    pub fn holds_press(&self, id: WidgetId) -> bool {
        self.is_active(id) && !self.claimed_this_frame
    }

    pub fn hot(&self) -> Option<WidgetId> {
        self.hot
    }

    pub fn active(&self) -> Active {
        self.active
    }

    /// True on the frame the button is released over the widget holding the
    /// press. Must be queried before [`Interaction::end_frame`].
    pub fn released_over(&self, id: WidgetId, hovered: bool, button_down: bool) -> bool {
        !button_down && hovered && self.is_active(id)
    }
}
