mod commons;

#[cfg(test)]
mod test {
    use crate::commons::{DefaultData, StubMailTransport};
    use digital_club_notifier::domain::club_member::ClubMember;
    use digital_club_notifier::domain::delivery_failure::DeliveryFailure;

    #[tokio::test]
    async fn should_send_account_approval_email() {
        let transport = StubMailTransport::succeeding();
        let dispatcher = DefaultData::email_dispatcher(transport.clone());

        let result = dispatcher.send_user_approval_email(&ClubMember::new("neema@example.com", Some("Neema Joseph"))).await;

        assert!(result.succeeded);
        assert_eq!("neema@example.com", result.destination);

        let delivered = transport.delivered();
        assert!(delivered[0].contains("Subject: Your Digital Club account is approved"));
        assert!(delivered[0].contains("https://club.example.com/login"));
    }

    #[tokio::test]
    async fn should_send_admin_promotion_email() {
        let transport = StubMailTransport::succeeding();
        let dispatcher = DefaultData::email_dispatcher(transport.clone());
        let promoter = ClubMember::new("lead@example.com", None);

        let result = dispatcher
            .send_admin_promotion_email(&ClubMember::new("neema@example.com", Some("Neema Joseph")), Some(&promoter))
            .await;

        assert!(result.succeeded);

        let delivered = transport.delivered();
        assert!(delivered[0].contains("Subject: You have been promoted to Digital Club admin"));
        assert!(delivered[0].contains("lead@example.com"));
        assert!(delivered[0].contains("https://club.example.com/admin"));
    }

    #[tokio::test]
    async fn should_skip_member_without_email() {
        let transport = StubMailTransport::succeeding();
        let dispatcher = DefaultData::email_dispatcher(transport.clone());
        let member = ClubMember {
            email: None,
            full_name: Some("Neema Joseph".to_string()),
        };

        let approval = dispatcher.send_user_approval_email(&member).await;
        let promotion = dispatcher.send_admin_promotion_email(&member, None).await;

        assert!(!approval.succeeded);
        assert_eq!(0, approval.attempts);
        assert!(matches!(approval.last_error, Some(DeliveryFailure::InvalidMessage(_))));
        assert!(!promotion.succeeded);
        assert_eq!(0, transport.attempts());
    }
}
