#[cfg(test)]
mod tests {
    use crate::generator::types::{
        ContentType, GeneratedArtifact, GenerationRequest, RequestError, TargetAudience,
        count_words,
    };

    #[test]
    fn test_content_type_parse_and_display() {
        assert_eq!("Blog Post".parse::<ContentType>().unwrap(), ContentType::BlogPost);
        assert_eq!("blog-post".parse::<ContentType>().unwrap(), ContentType::BlogPost);
        assert_eq!(
            "research_paper".parse::<ContentType>().unwrap(),
            ContentType::ResearchPaper
        );
        assert_eq!("guide".parse::<ContentType>().unwrap(), ContentType::TechnicalGuide);
        assert!("poem".parse::<ContentType>().is_err());

        for content_type in [
            ContentType::BlogPost,
            ContentType::Article,
            ContentType::ResearchPaper,
            ContentType::TechnicalGuide,
        ] {
            assert_eq!(
                content_type.to_string().parse::<ContentType>().unwrap(),
                content_type
            );
        }
    }

    #[test]
    fn test_target_audience_parse() {
        assert_eq!(
            " Academic ".parse::<TargetAudience>().unwrap(),
            TargetAudience::Academic
        );
        assert_eq!(TargetAudience::Business.to_string(), "Business");
        assert!("kids".parse::<TargetAudience>().is_err());
    }

    #[test]
    fn test_request_trims_topic() {
        let request = GenerationRequest::new(
            "  Quantum Computing ",
            ContentType::Article,
            TargetAudience::Business,
            0.0,
            GenerationRequest::MIN_WORDS,
        )
        .unwrap();

        assert_eq!(request.topic(), "Quantum Computing");
        assert_eq!(request.temperature(), 0.0);
        assert_eq!(request.max_words(), 500);
    }

    #[test]
    fn test_request_rejects_blank_topic() {
        let err = GenerationRequest::new(
            " \n\t",
            ContentType::default(),
            TargetAudience::default(),
            0.7,
            1500,
        )
        .unwrap_err();

        assert_eq!(err, RequestError::EmptyTopic);
        assert_eq!(
            err.to_string(),
            "Please enter a topic before generating content."
        );
    }

    #[test]
    fn test_request_bounds() {
        let build = |temperature: f64, max_words: u32| {
            GenerationRequest::new(
                "Topic",
                ContentType::default(),
                TargetAudience::default(),
                temperature,
                max_words,
            )
        };

        assert!(build(1.0, GenerationRequest::MAX_WORDS).is_ok());
        assert_eq!(
            build(1.2, 1500).unwrap_err(),
            RequestError::TemperatureOutOfRange(1.2)
        );
        assert_eq!(
            build(0.5, 499).unwrap_err(),
            RequestError::MaxWordsOutOfRange { value: 499 }
        );
        assert!(build(0.5, 5001).unwrap_err().to_string().contains("[500, 5000]"));
    }

    #[test]
    fn test_artifact_word_count() {
        let artifact = GeneratedArtifact::new("one two\nthree\n\nfour".to_string());
        assert_eq!(artifact.word_count(), 4);
        assert!(artifact.exceeds(3));
        assert!(!artifact.exceeds(4));
        assert_eq!(count_words("   "), 0);
    }
}
