#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use cosmwasm_std::{Addr, Binary, Decimal};
    use cw_multi_test::App;

    use sweepstakes::error::ContractError;
    use sweepstakes_export::msg::{QueryMsg, SweepstakesResponse, VerifyDrawResponse, WinnersResponse};
    use sweepstakes_export::state::{ContractInfo, SweepstakesState, Ticket};

    use crate::common_setup::setup::{
        advance_time, create_sweepstakes, proper_instantiate, record_ticket, select_winners,
        three_winner_table, OWNER_ADDR, SALES_DURATION,
    };

    const NONCE: [u8; 32] = [9u8; 32];

    fn assert_contract_error(err: anyhow::Error, contract_error: ContractError) {
        assert_eq!(err.downcast_ref::<ContractError>(), Some(&contract_error));
    }

    fn query_sweepstakes(app: &App, addr: &Addr, sweepstakes_id: u64) -> SweepstakesResponse {
        app.wrap()
            .query_wasm_smart(addr.clone(), &QueryMsg::SweepstakesInfo { sweepstakes_id })
            .unwrap()
    }

    fn query_winners(app: &App, addr: &Addr, sweepstakes_id: u64) -> WinnersResponse {
        app.wrap()
            .query_wasm_smart(addr.clone(), &QueryMsg::Winners { sweepstakes_id })
            .unwrap()
    }

    fn query_verify(app: &App, addr: &Addr, sweepstakes_id: u64) -> VerifyDrawResponse {
        app.wrap()
            .query_wasm_smart(addr.clone(), &QueryMsg::VerifyDraw { sweepstakes_id })
            .unwrap()
    }

    /// Six tickets from four users, a minute apart
    fn sell_tickets(app: &mut App, addr: &Addr, sweepstakes_id: u64) {
        let sales = [
            ("alice", "1"),
            ("bob", "2.5"),
            ("carol", "0.75"),
            ("alice", "4"),
            ("dave", "0"),
            ("bob", "1"),
        ];
        for (owner, weight) in sales {
            record_ticket(app, addr, sweepstakes_id, owner, Decimal::from_str(weight).unwrap())
                .unwrap();
            advance_time(app, 60);
        }
    }

    #[test]
    fn can_init() {
        let (app, sweepstakes_addr) = proper_instantiate();
        let contract_info: ContractInfo = app
            .wrap()
            .query_wasm_smart(sweepstakes_addr, &QueryMsg::ContractInfo {})
            .unwrap();
        assert_eq!(contract_info.owner.owner, Addr::unchecked(OWNER_ADDR));
        assert_eq!(contract_info.last_sweepstakes_id, None);
    }

    #[test]
    fn full_sweepstakes_lifecycle() {
        let (mut app, addr) = proper_instantiate();
        create_sweepstakes(&mut app, &addr, &NONCE, three_winner_table()).unwrap();
        sell_tickets(&mut app, &addr, 0);

        // Sales are still running
        let err = select_winners(&mut app, &addr, 0, &NONCE).unwrap_err();
        assert_contract_error(err, ContractError::NotClosedYet {});

        advance_time(&mut app, SALES_DURATION);
        assert_eq!(
            query_sweepstakes(&app, &addr, 0).sweepstakes_state,
            SweepstakesState::Closed
        );
        let err = record_ticket(&mut app, &addr, 0, "erin", Decimal::one()).unwrap_err();
        assert_contract_error(
            err,
            ContractError::SweepstakesClosed {
                status: SweepstakesState::Closed,
            },
        );

        // The revealed nonce must match the commitment
        let err = select_winners(&mut app, &addr, 0, &[8u8; 32]).unwrap_err();
        assert_contract_error(err, ContractError::InvalidNonce {});

        let response = select_winners(&mut app, &addr, 0, &NONCE).unwrap();
        let draw_event = response
            .events
            .iter()
            .find(|event| event.ty == "wasm-sweepstakes_draw")
            .unwrap();
        let seed = draw_event
            .attributes
            .iter()
            .find(|attribute| attribute.key == "seed")
            .unwrap()
            .value
            .clone();

        let winners = query_winners(&app, &addr, 0).winners;
        assert_eq!(winners.len(), 3);
        let ranks: Vec<u32> = winners.iter().map(|winner| winner.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(winners[0].label, "grand prize");
        assert_eq!(winners[2].label, "runner-up");

        // A ticket wins at most once, and a weightless ticket never does
        let ticket_ids: HashSet<&str> = winners.iter().map(|w| w.ticket_id.as_str()).collect();
        assert_eq!(ticket_ids.len(), 3);
        assert!(!ticket_ids.contains("0-4"));

        let tickets: Vec<Ticket> = app
            .wrap()
            .query_wasm_smart(
                addr.clone(),
                &QueryMsg::Tickets {
                    sweepstakes_id: 0,
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap();
        for winner in winners.iter() {
            let ticket = tickets.iter().find(|t| t.id == winner.ticket_id).unwrap();
            assert_eq!(ticket.owner, winner.user);
        }

        // Anybody can replay the draw from the public record
        let verify = query_verify(&app, &addr, 0);
        assert!(verify.matches_record);
        assert_eq!(verify.winners, winners);
        assert_eq!(verify.seed, Binary::from_base64(&seed).unwrap());

        let info = query_sweepstakes(&app, &addr, 0);
        assert_eq!(info.sweepstakes_state, SweepstakesState::Drawn);
        assert_eq!(info.sweepstakes_info.nonce, Some(Binary::from(NONCE.to_vec())));
    }

    #[test]
    fn winners_are_selected_once() {
        let (mut app, addr) = proper_instantiate();
        create_sweepstakes(&mut app, &addr, &NONCE, three_winner_table()).unwrap();
        sell_tickets(&mut app, &addr, 0);
        advance_time(&mut app, SALES_DURATION);

        select_winners(&mut app, &addr, 0, &NONCE).unwrap();
        let first = query_sweepstakes(&app, &addr, 0);

        advance_time(&mut app, 60);
        let err = select_winners(&mut app, &addr, 0, &NONCE).unwrap_err();
        assert_contract_error(err, ContractError::AlreadySelected {});
        assert_eq!(query_sweepstakes(&app, &addr, 0), first);
    }

    #[test]
    fn sweepstakes_are_drawn_independently() {
        let (mut app, addr) = proper_instantiate();
        create_sweepstakes(&mut app, &addr, &NONCE, three_winner_table()).unwrap();
        create_sweepstakes(&mut app, &addr, &[3u8; 32], three_winner_table()).unwrap();
        sell_tickets(&mut app, &addr, 0);
        sell_tickets(&mut app, &addr, 1);
        advance_time(&mut app, SALES_DURATION);

        // Nothing sold to the third one
        create_sweepstakes(&mut app, &addr, &NONCE, three_winner_table()).unwrap();
        advance_time(&mut app, SALES_DURATION);
        let err = select_winners(&mut app, &addr, 2, &NONCE).unwrap_err();
        assert_contract_error(err, ContractError::NoEntries {});

        select_winners(&mut app, &addr, 1, &[3u8; 32]).unwrap();
        assert_eq!(
            query_sweepstakes(&app, &addr, 0).sweepstakes_state,
            SweepstakesState::Closed
        );
        assert!(query_verify(&app, &addr, 1).matches_record);

        select_winners(&mut app, &addr, 0, &NONCE).unwrap();
        let winners: Vec<String> = query_winners(&app, &addr, 1)
            .winners
            .into_iter()
            .map(|winner| winner.ticket_id)
            .collect();
        assert!(winners.iter().all(|id| id.starts_with("1-")));
        assert!(query_verify(&app, &addr, 0).matches_record);
    }

    #[test]
    fn unknown_sweepstakes() {
        let (mut app, addr) = proper_instantiate();
        let err = select_winners(&mut app, &addr, 12, &NONCE).unwrap_err();
        assert_contract_error(err, ContractError::NotFound { sweepstakes_id: 12 });
    }
}
