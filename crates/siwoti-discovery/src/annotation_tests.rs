    use super::*;
    use crate::extractor::extract;
    use crate::html::{parse_html, HtmlDocument, ROW_HEIGHT, VIEWPORT_WIDTH};
    use crate::surface::MemorySurface;
    use scraper::Html;
    use siwoti_config::SiteDescriptor;
    use siwoti_protocols::{PageLocation, PanelKind};

    const PAGE: &str = r#"
        <html><body>
          <div class="comment">lol you are so dumb</div>
          <a href="/thread/2"><div class="comment">A perfectly reasonable comment</div></a>
        </body></html>
    "#;

    fn scanned(html: &Html) -> (HtmlDocument<'_>, CandidateSet) {
        let doc = HtmlDocument::new(html, PageLocation::default());
        let descriptor = SiteDescriptor::new(vec![".comment".to_string()]);
        let candidates = extract(&doc, Some(&descriptor));
        (doc, candidates)
    }

    fn manager_with_controls() -> (AnnotationManager<MemorySurface>, Vec<OverlayId>) {
        let html = parse_html(PAGE);
        let (doc, candidates) = scanned(&html);
        let mut manager = AnnotationManager::new(MemorySurface::new());
        manager.annotate(&doc, &candidates, Tone::Funny);
        let controls = manager.annotations().iter().map(|a| a.control).collect();
        (manager, controls)
    }

    fn reply(text: &str, cached: bool) -> GeneratedReply {
        GeneratedReply {
            reply: text.to_string(),
            cached,
        }
    }

    #[test]
    fn test_annotate_mounts_idle_controls() {
        let (manager, controls) = manager_with_controls();
        assert_eq!(controls.len(), 2);

        let surface = manager.surface();
        assert_eq!(surface.listener_count(), 2);
        assert_eq!(surface.highlights().len(), 2);

        let mounted = surface.control(controls[0]).unwrap();
        assert_eq!(mounted.view.label, LABEL_IDLE);
        assert!(mounted.view.enabled);
        assert_eq!(mounted.view.tone_label, TONE_PLACEHOLDER);

        let annotation = manager.get(controls[0]).unwrap();
        assert_eq!(annotation.state, ControlState::Idle);
        assert_eq!(annotation.comment, "lol you are so dumb");
        assert_eq!(annotation.position.x, VIEWPORT_WIDTH - CONTROL_INSET_X);
        assert_eq!(
            annotation.position.y,
            annotation.container.0 as f64 * ROW_HEIGHT + CONTROL_OFFSET_Y
        );
    }

    #[test]
    fn test_container_is_never_the_link() {
        let html = parse_html(PAGE);
        let (doc, candidates) = scanned(&html);
        let mut manager = AnnotationManager::new(MemorySurface::new());
        manager.annotate(&doc, &candidates, Tone::Mild);

        for annotation in manager.annotations() {
            assert_ne!(doc.tag_name(annotation.container), "a");
        }
    }

    #[test]
    fn test_rescan_sweeps_everything() {
        let html = parse_html(PAGE);
        let (doc, candidates) = scanned(&html);
        let mut manager = AnnotationManager::new(MemorySurface::new());
        manager.annotate(&doc, &candidates, Tone::Funny);

        let first = manager.annotations()[0].control;
        let ticket = manager.activate(first).unwrap();
        let panel = manager.complete(ticket.control, Ok(reply("ha", false))).unwrap();
        let centered = manager.show_centered_panel(&PanelView::error("boom"));

        manager.annotate(&doc, &candidates, Tone::Funny);
        let surface = manager.surface();
        assert!(!surface.is_mounted(first));
        assert!(!surface.is_mounted(panel));
        assert!(!surface.is_mounted(centered));
        assert_eq!(surface.controls().count(), 2);
        assert_eq!(surface.panels().count(), 0);
        assert_eq!(surface.listener_count(), 2);
        assert_eq!(surface.highlights().len(), 2);
    }

    #[test]
    fn test_generation_success() {
        let (mut manager, controls) = manager_with_controls();

        let ticket = manager.activate(controls[0]).unwrap();
        assert_eq!(ticket.comment, "lol you are so dumb");
        assert_eq!(ticket.tone, Tone::Funny);

        let view = &manager.surface().control(controls[0]).unwrap().view;
        assert_eq!(view.label, LABEL_GENERATING);
        assert!(!view.enabled);
        assert!(!view.tone_selector_enabled);

        let panel = manager.complete(controls[0], Ok(reply("Nice try!", true))).unwrap();
        assert_eq!(manager.get(controls[0]).unwrap().state, ControlState::Succeeded);

        let mounted = manager.surface().panel(panel).unwrap();
        assert_eq!(mounted.view.kind, PanelKind::Reply);
        assert!(mounted.view.cached);
        assert_eq!(mounted.view.actions, vec![PanelAction::Copy, PanelAction::Close]);

        let control = manager.get(controls[0]).unwrap();
        assert_eq!(
            mounted.placement,
            PanelPlacement::At(Point::new(
                control.position.x - PANEL_SHIFT_X,
                control.position.y + CONTROL_HEIGHT + PANEL_GAP_Y
            ))
        );
        let view = &manager.surface().control(controls[0]).unwrap().view;
        assert_eq!(view.label, LABEL_IDLE);
        assert!(view.enabled);
    }

    #[test]
    fn test_generation_failure_shows_error_panel() {
        let (mut manager, controls) = manager_with_controls();
        manager.activate(controls[1]).unwrap();
        let panel = manager
            .complete(controls[1], Err("HTTP 500: upstream".to_string()))
            .unwrap();

        assert_eq!(manager.get(controls[1]).unwrap().state, ControlState::Failed);
        let mounted = manager.surface().panel(panel).unwrap();
        assert!(mounted.view.is_error());
        assert_eq!(mounted.view.body, "HTTP 500: upstream");
    }

    #[test]
    fn test_double_activation_rejected() {
        let (mut manager, controls) = manager_with_controls();
        manager.activate(controls[0]).unwrap();
        let err = manager.activate(controls[0]).unwrap_err();
        assert!(matches!(
            err,
            AnnotationError::InvalidTransition {
                from: ControlState::Generating,
                ..
            }
        ));
    }

    #[test]
    fn test_reactivation_replaces_panel() {
        let (mut manager, controls) = manager_with_controls();
        manager.activate(controls[0]).unwrap();
        let first = manager.complete(controls[0], Err("boom".to_string())).unwrap();

        manager.activate(controls[0]).unwrap();
        assert_eq!(manager.get(controls[0]).unwrap().state, ControlState::Generating);
        let second = manager.complete(controls[0], Ok(reply("ok", false))).unwrap();

        assert!(!manager.surface().is_mounted(first));
        assert!(manager.surface().is_mounted(second));
        assert_eq!(manager.surface().panels().count(), 1);
    }

    #[test]
    fn test_new_result_closes_other_panels() {
        let (mut manager, controls) = manager_with_controls();
        let centered = manager.show_centered_panel(&PanelView::error("earlier"));
        manager.activate(controls[0]).unwrap();
        let first = manager.complete(controls[0], Ok(reply("one", false))).unwrap();
        assert!(!manager.surface().is_mounted(centered));

        manager.activate(controls[1]).unwrap();
        let second = manager.complete(controls[1], Ok(reply("two", false))).unwrap();

        assert!(!manager.surface().is_mounted(first));
        assert!(manager.surface().is_mounted(second));
        assert_eq!(manager.surface().panels().count(), 1);
        assert_eq!(manager.get(controls[0]).unwrap().panel, None);
        assert!(manager.surface().is_mounted(controls[0]));
    }

    #[test]
    fn test_one_control_per_container() {
        let html = parse_html(
            r#"<html><body><div class="comment">you are wrong <a class="author">bob</a></div></body></html>"#,
        );
        let doc = HtmlDocument::new(&html, PageLocation::default());
        let descriptor = SiteDescriptor::new(vec![".comment".to_string(), ".author".to_string()]);
        let candidates = extract(&doc, Some(&descriptor));
        assert_eq!(candidates.len(), 2);

        let mut manager = AnnotationManager::new(MemorySurface::new());
        assert_eq!(manager.annotate(&doc, &candidates, Tone::Funny), 1);

        let surface = manager.surface();
        assert_eq!(surface.controls().count(), 1);
        assert_eq!(surface.highlights().len(), 1);
        assert_eq!(surface.listener_count(), 1);
        assert_eq!(manager.annotations()[0].comment, "you are wrong bob");
    }

    #[test]
    fn test_complete_without_activation_rejected() {
        let (mut manager, controls) = manager_with_controls();
        assert!(manager.complete(controls[0], Ok(reply("x", false))).is_err());
        assert!(matches!(
            manager.activate(OverlayId(999)),
            Err(AnnotationError::UnknownControl(999))
        ));
    }

    #[test]
    fn test_dismiss_panel_keeps_control() {
        let (mut manager, controls) = manager_with_controls();
        manager.activate(controls[0]).unwrap();
        let panel = manager.complete(controls[0], Ok(reply("ok", false))).unwrap();

        assert!(manager.dismiss_panel(panel));
        assert!(!manager.surface().is_mounted(panel));
        assert!(manager.surface().is_mounted(controls[0]));
        assert_eq!(manager.get(controls[0]).unwrap().panel, None);
        assert!(!manager.dismiss_panel(panel));
    }

    #[test]
    fn test_tone_menu() {
        let (mut manager, controls) = manager_with_controls();

        assert!(manager.toggle_menu(controls[0]).unwrap());
        assert!(manager.surface().control(controls[0]).unwrap().view.menu_open);

        manager.select_tone(controls[0], Tone::Sarcastic).unwrap();
        let view = &manager.surface().control(controls[0]).unwrap().view;
        assert!(!view.menu_open);
        assert_eq!(view.tone, Tone::Sarcastic);
        assert_eq!(view.tone_label, Tone::Sarcastic.emoji());

        // Other controls keep the default tone.
        assert_eq!(manager.get(controls[1]).unwrap().tone, Tone::Funny);
        assert_eq!(manager.activate(controls[0]).unwrap().tone, Tone::Sarcastic);
        assert!(manager.toggle_menu(controls[0]).is_err());
    }

    #[test]
    fn test_outside_click_closes_menus() {
        let (mut manager, controls) = manager_with_controls();
        manager.toggle_menu(controls[0]).unwrap();
        manager.toggle_menu(controls[1]).unwrap();

        manager.on_document_click(Some(controls[1]));
        assert!(!manager.get(controls[0]).unwrap().menu_open);
        assert!(manager.get(controls[1]).unwrap().menu_open);

        manager.on_document_click(None);
        assert!(!manager.get(controls[1]).unwrap().menu_open);
    }

    #[test]
    fn test_detached_control_releases_listener() {
        let (mut manager, controls) = manager_with_controls();
        manager.surface_mut().detach(controls[0]);

        assert_eq!(manager.observe_removals(), 1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.surface().listener_count(), 1);
        assert!(manager.get(controls[0]).is_none());
        assert_eq!(manager.observe_removals(), 0);
    }

    #[test]
    fn test_clear_all_on_empty_manager() {
        let mut manager = AnnotationManager::new(MemorySurface::new());
        manager.clear_all();
        assert!(manager.is_empty());
    }
