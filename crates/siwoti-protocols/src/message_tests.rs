    use super::*;
    use crate::types::ArticleContext;
    use serde_json::json;

    #[test]
    fn test_scan_request_tag() {
        let json = serde_json::to_value(Request::Scan).unwrap();
        assert_eq!(json, json!({ "type": "scan" }));
    }

    #[test]
    fn test_generate_reply_request_parses_flat_payload() {
        let request: Request = serde_json::from_value(json!({
            "type": "generateReply",
            "comment": "lol you are so dumb",
            "tone": "sarcastic",
            "articleContext": { "title": "T", "content": "C", "url": "https://x.test/a" }
        }))
        .unwrap();

        let expected = ReplyRequest::new("lol you are so dumb", Tone::Sarcastic)
            .with_article_context(ArticleContext::new("T", "C", "https://x.test/a"));
        assert_eq!(request, Request::GenerateReply(expected));
        assert_eq!(request.kind(), "generateReply");
    }

    #[test]
    fn test_selection_request_tone_optional() {
        let request: Request = serde_json::from_value(json!({
            "type": "generateReplyFromSelection",
            "comment": "selected"
        }))
        .unwrap();
        assert_eq!(
            request,
            Request::GenerateReplyFromSelection {
                comment: "selected".to_string(),
                tone: None
            }
        );
    }

    #[test]
    fn test_save_requests_use_extension_field_names() {
        let request: Request =
            serde_json::from_value(json!({ "type": "saveApiKey", "apiKey": "sk-1" })).unwrap();
        assert_eq!(request, Request::SaveApiKey { api_key: "sk-1".to_string() });

        let request: Request =
            serde_json::from_value(json!({ "type": "saveApiBase", "apiBase": "http://localhost:3000" }))
                .unwrap();
        assert_eq!(request.kind(), "saveApiBase");

        let request: Request =
            serde_json::from_value(json!({ "type": "saveModel", "model": "llama3.2" })).unwrap();
        assert_eq!(request, Request::SaveModel { model: "llama3.2".to_string() });
    }

    #[test]
    fn test_unknown_request_type_rejected() {
        let result: Result<Request, _> = serde_json::from_value(json!({ "type": "explode" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_summary_shapes() {
        assert_eq!(
            serde_json::to_value(ScanSummary::empty()).unwrap(),
            json!({ "found": false, "count": 0 })
        );
        assert_eq!(
            serde_json::to_value(ScanSummary::unsupported()).unwrap(),
            json!({ "found": false, "count": 0, "unsupported": true })
        );
        assert_eq!(
            serde_json::to_value(ScanSummary::disabled()).unwrap(),
            json!({ "found": false, "count": 0, "disabled": true })
        );
        assert_eq!(
            serde_json::to_value(ScanSummary::found(3, Some("lol".to_string()))).unwrap(),
            json!({ "found": true, "count": 3, "text": "Found 3 comment(s)", "worst": "lol" })
        );
    }

    #[test]
    fn test_reply_response_shapes() {
        let fresh = ReplyResponse::from(GeneratedReply { reply: "hi".to_string(), cached: false });
        assert_eq!(serde_json::to_value(&fresh).unwrap(), json!({ "reply": "hi" }));

        let cached = ReplyResponse::from(GeneratedReply { reply: "hi".to_string(), cached: true });
        assert_eq!(
            serde_json::to_value(&cached).unwrap(),
            json!({ "reply": "hi", "cached": true })
        );

        let failure = ReplyResponse::error("HTTP 500: boom");
        assert!(!failure.is_success());
        assert_eq!(serde_json::to_value(&failure).unwrap(), json!({ "error": "HTTP 500: boom" }));
    }

    #[test]
    fn test_reply_response_deserializes_both_shapes() {
        let success: ReplyResponse = serde_json::from_value(json!({ "reply": "x" })).unwrap();
        assert_eq!(success, ReplyResponse::Success { reply: "x".to_string(), cached: false });
        let failure: ReplyResponse = serde_json::from_value(json!({ "error": "bad" })).unwrap();
        assert_eq!(failure, ReplyResponse::error("bad"));
    }

    #[test]
    fn test_response_is_untagged() {
        let response = Response::Ack(Ack::ok());
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "ok": true }));
    }
