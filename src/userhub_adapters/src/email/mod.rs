pub mod abstract_email_verifier;
pub mod mock_email_client;
pub mod postmark_email_client;
