use anyhow::Result;
use log::info;

use crate::logic::admin::unexpected;
use crate::logic::respond::RpcResponse;
use crate::logic::validate::Validate;
use crate::model::{MoveStarShipRequest, MoveStarShipResponse, ResponseMessage};
use crate::store::{StarShipStore, StoreError};
use crate::strings::en_za as strings;

/// Operations available to regular users.
pub struct PlanetUser;

impl PlanetUser {
    /// Move a starship to another planet. Moving a ship to the planet it
    /// already sits at succeeds without writing.
    pub async fn move_starship<S: StarShipStore>(
        store: &S,
        request: MoveStarShipRequest,
    ) -> Result<MoveStarShipResponse> {
        if let Err(errors) = request.validate() {
            return Ok(MoveStarShipResponse::validation_error(errors));
        }

        match store
            .move_starship(request.starship_id, request.planet_id)
            .await
        {
            Ok(Some(starship)) => {
                info!(
                    "Starship {} is at planet {}",
                    starship.starship_id, starship.planet_id
                );
                Ok(MoveStarShipResponse::success(()))
            }
            Ok(None) => Ok(MoveStarShipResponse::failure(ResponseMessage::not_found(
                strings::VALIDATION_ERROR_STARSHIP_ID_DOES_NOT_EXIST,
            ))),
            Err(StoreError::ForeignKeyViolation { .. }) => Ok(MoveStarShipResponse::failure(
                ResponseMessage::not_found(strings::VALIDATION_ERROR_PLANET_ID_DOES_NOT_EXIST),
            )),
            Err(e) => Err(unexpected("MoveStarShip", e)),
        }
    }
}
