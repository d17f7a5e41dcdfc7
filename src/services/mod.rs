/*
 * Responsibility
 * - ドメイン寄りのサービス層 (HTTP に依存しないロジック)
 */
pub mod auth;
