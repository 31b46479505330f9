mod tests {
    use tree_lights::sprite::GameKey;
    use tree_lights::{
        AngleTable, Action, ControlMessage, FrameState, Geometry, ModeId, ModeSet, ModeSlot,
        Modifiers, Rgb,
    };

    fn geometry() -> Geometry {
        let table: AngleTable = [(0, 0.0), (30, 180.0), (60, 0.0)].into_iter().collect();
        Geometry::new(60, table).unwrap()
    }

    fn attract_state(geometry: &Geometry) -> FrameState {
        let mut state = FrameState::new(ModeSet::new(geometry), geometry.count());
        assert!(state.select_mode(ModeId::Attract));
        state
    }

    fn action(state: &mut FrameState, action: Action) {
        state.handle_message(ControlMessage::Action(action));
    }

    #[test]
    fn test_select_active_mode_is_a_no_op() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        assert!(!state.select_mode(ModeId::Attract));
        assert_eq!(state.active_mode(), Some(ModeId::Attract));
    }

    #[test]
    fn test_select_mode_starts_a_scene() {
        let geometry = geometry();
        let state = attract_state(&geometry);
        assert!(state.mode().and_then(ModeSlot::current_scene).is_some());
    }

    #[test]
    fn test_unconfigured_custom_mode_is_refused() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        assert!(!state.select_mode(ModeId::Custom));
        assert_eq!(state.active_mode(), Some(ModeId::Attract));
    }

    #[test]
    fn test_toggle_alternates_between_empty_and_attract() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        action(&mut state, Action::Toggle);
        assert_eq!(state.active_mode(), Some(ModeId::Empty));
        action(&mut state, Action::Toggle);
        assert_eq!(state.active_mode(), Some(ModeId::Attract));
    }

    #[test]
    fn test_stop_and_off_are_cleared_by_start() {
        let geometry = geometry();
        for resume in [Action::Start, Action::Resume, Action::On] {
            let mut state = attract_state(&geometry);
            action(&mut state, Action::Stop);
            action(&mut state, Action::Off);
            assert!(state.modifiers().contains(Modifiers::STOP | Modifiers::OFF));
            action(&mut state, resume);
            assert!(state.modifiers().is_empty());
        }
    }

    #[test]
    fn test_next_resumes_and_switches_scene() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        let before = state.mode().and_then(ModeSlot::current_scene).map(|scene| scene.name());
        action(&mut state, Action::Stop);
        action(&mut state, Action::Next);
        let after = state.mode().and_then(ModeSlot::current_scene).map(|scene| scene.name());
        assert!(state.modifiers().is_empty());
        assert_ne!(before, after);
    }

    #[test]
    fn test_spin_restarts_the_counter() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        let mut pixels = vec![Rgb::default(); geometry.count()];
        action(&mut state, Action::Spin);
        state.apply_modifiers(&mut pixels);
        state.apply_modifiers(&mut pixels);
        assert_eq!(state.spin_offset(), 24);

        action(&mut state, Action::Spin);
        assert_eq!(state.spin_offset(), 0);
        assert!(state.modifiers().contains(Modifiers::SPIN));
    }

    #[test]
    fn test_custom_spin_limits() {
        let geometry = geometry();
        let mut state = attract_state(&geometry).with_spin(5, 10);
        let mut pixels = vec![Rgb::default(); geometry.count()];
        action(&mut state, Action::Spin);
        state.apply_modifiers(&mut pixels);
        assert!(state.modifiers().contains(Modifiers::SPIN));
        state.apply_modifiers(&mut pixels);
        assert!(!state.modifiers().contains(Modifiers::SPIN));
    }

    #[test]
    fn test_game_key_switches_to_game_and_resumes() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        action(&mut state, Action::Off);
        state.handle_message(ControlMessage::GameKey {
            key: GameKey::Fire,
            pressed: true,
        });
        assert_eq!(state.active_mode(), Some(ModeId::Game));
        assert!(state.modifiers().is_empty());
        let scene = state.mode().and_then(ModeSlot::current_scene).unwrap();
        assert_eq!(scene.name(), "game");
    }

    #[test]
    fn test_repeated_reverse_keeps_the_flag() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        action(&mut state, Action::Reverse);
        action(&mut state, Action::Reverse);
        assert!(state.modifiers().contains(Modifiers::REVERSE));
    }

    #[test]
    fn test_ping_changes_nothing() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        state.handle_message(ControlMessage::Ping);
        assert_eq!(state.active_mode(), Some(ModeId::Attract));
        assert!(state.modifiers().is_empty());
    }

    #[test]
    fn test_pixel_frame_switches_to_slave() {
        let geometry = geometry();
        let mut state = attract_state(&geometry);
        state.handle_message(ControlMessage::PixelFrame(Vec::new()));
        assert_eq!(state.active_mode(), Some(ModeId::Slave));
        assert!(state.is_slave());
    }
}
