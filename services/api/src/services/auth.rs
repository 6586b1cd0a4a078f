//! OTP issuance and verification

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    clients::SmsSender,
    error::{ServiceError, ServiceResult},
    jwt::TokenService,
    models::{LoginResult, OtpCode, OtpCodeIssued, VerifyOtpRequest},
    repositories::OtpCodeRepository,
    response::BaseResponse,
    services::UserService,
    validation,
};

const OTP_SENT: &str = "OTP code sent successfully";
const VERIFICATION_SUCCESSFUL: &str = "Verification successful";
const INCORRECT_CODE: &str = "Incorrect authentication code";

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    otp_codes: OtpCodeRepository,
    sms: Arc<dyn SmsSender>,
    tokens: TokenService,
    otp_expiry_minutes: u64,
}

impl AuthService {
    pub fn new(
        users: UserService,
        otp_codes: OtpCodeRepository,
        sms: Arc<dyn SmsSender>,
        tokens: TokenService,
        otp_expiry_minutes: u64,
    ) -> Self {
        Self {
            users,
            otp_codes,
            sms,
            tokens,
            otp_expiry_minutes,
        }
    }

    /// Issue a code for an existing account and text it to the owner
    ///
    /// Only the prefix and request id are returned; the numeric code
    /// travels by SMS alone.
    pub async fn request_otp_code(&self, mobile_number: &str) -> ServiceResult<OtpCodeIssued> {
        self.users.get_account(mobile_number).await?;

        let otp_code = OtpCode::generate();
        self.otp_codes
            .cache_otp_code(mobile_number, &otp_code)
            .await
            .map_err(|e| {
                error!(mobile_number = %mobile_number, "Failed to cache OTP code: {}", e);
                ServiceError::DependencyError
            })?;

        let content = otp_code.sms_content(self.otp_expiry_minutes);
        self.sms
            .send_sms(mobile_number, &content)
            .await
            .map_err(|e| {
                error!(
                    mobile_number = %mobile_number,
                    request_id = %otp_code.request_id,
                    "Failed to send OTP code: {}", e
                );
                ServiceError::InternalError
            })?;

        info!(
            mobile_number = %mobile_number,
            request_id = %otp_code.request_id,
            "OTP code issued"
        );
        Ok(BaseResponse::ok_with_message(
            OtpCodeIssued::from(&otp_code),
            OTP_SENT,
        ))
    }

    /// Check a code against the live record and mint a bearer token
    ///
    /// A matching code is consumed before the token is minted. When several
    /// requests race on the same code only the one whose delete removed the
    /// record signs in; the others get a dependency error.
    pub async fn verify_otp_code(
        &self,
        mobile_number: &str,
        request: VerifyOtpRequest,
    ) -> ServiceResult<LoginResult> {
        validation::validate_verify_otp(&request).map_err(ServiceError::BadRequest)?;

        let cached = self
            .otp_codes
            .get_otp_code(mobile_number, &request.request_id)
            .await
            .unwrap_or_else(|e| {
                error!(
                    mobile_number = %mobile_number,
                    request_id = %request.request_id,
                    "Failed to read OTP code: {}", e
                );
                None
            });

        let Some(otp_code) = cached else {
            warn!(
                mobile_number = %mobile_number,
                request_id = %request.request_id,
                "OTP code not found or expired"
            );
            return Err(ServiceError::DependencyError);
        };

        if !otp_code.matches(&request) {
            warn!(
                mobile_number = %mobile_number,
                request_id = %request.request_id,
                "Incorrect OTP code"
            );
            return Err(ServiceError::BadRequest(INCORRECT_CODE.to_string()));
        }

        match self
            .otp_codes
            .consume(mobile_number, &request.request_id)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    mobile_number = %mobile_number,
                    request_id = %request.request_id,
                    "OTP code already used"
                );
                return Err(ServiceError::DependencyError);
            }
            Err(e) => {
                error!(
                    mobile_number = %mobile_number,
                    request_id = %request.request_id,
                    "Failed to consume OTP code: {}", e
                );
                return Err(ServiceError::DependencyError);
            }
        }

        let user = self
            .users
            .get_account(mobile_number)
            .await?
            .data
            .ok_or(ServiceError::InternalError)?;

        let token = self.tokens.generate_token(&user).map_err(|e| {
            error!(mobile_number = %mobile_number, "Failed to mint bearer token: {}", e);
            ServiceError::InternalError
        })?;

        info!(mobile_number = %mobile_number, "OTP verification successful");
        Ok(BaseResponse::ok_with_message(
            LoginResult {
                token: token.bearer_token,
                expiry: token.expiry,
                user,
            },
            VERIFICATION_SUCCESSFUL,
        ))
    }
}
