use anyhow::Result;
use ratatui::{
    crossterm::event::{self, Event, KeyEvent, KeyEventKind},
    DefaultTerminal,
};
use tokio::runtime::Runtime;

use crate::{
    cmd::Command,
    config::Config,
    error::Error,
    features::{
        api_resources::kube::{ResourceKind, ResourceKindCatalog},
        resource_table::{ResourceDescriptor, ResourceTableFetcher},
    },
    kube::{KubeClient, KubeClientRequest},
    logger,
    ui::{draw, EventResult, EventRouter, Page, TableView},
};

pub struct App;

impl App {
    pub fn run(cmd: Command, config: Config) -> Result<()> {
        let runtime = Runtime::new()?;

        let client = runtime
            .block_on(KubeClient::try_from_kubeconfig(cmd.kubeconfig, cmd.context))
            .map_err(Error::Connection)?;

        let initial_resource = match cmd.resource {
            Some(resource) => Some(resource),
            None => config
                .view
                .initial_resource
                .as_deref()
                .map(str::parse::<ResourceDescriptor>)
                .transpose()?,
        };

        logger!(info, "app start");

        let mut terminal = ratatui::init();

        let result = Session::new(&runtime, &client).run(&mut terminal, initial_resource);

        ratatui::restore();

        logger!(info, "app end");

        result
    }
}

/// One interactive session. Fetches block the loop until they finish.
struct Session<'a, C>
where
    C: KubeClientRequest,
{
    runtime: &'a Runtime,
    client: &'a C,
    router: EventRouter,
    kinds: TableView,
    resource: TableView,
    descriptor: Option<ResourceDescriptor>,
    status: Option<String>,
}

impl<'a, C> Session<'a, C>
where
    C: KubeClientRequest,
{
    fn new(runtime: &'a Runtime, client: &'a C) -> Self {
        Self {
            runtime,
            client,
            router: EventRouter::new(Page::Kinds),
            kinds: TableView::new("Kinds"),
            resource: TableView::new("Resource"),
            descriptor: None,
            status: None,
        }
    }

    fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        initial_resource: Option<ResourceDescriptor>,
    ) -> Result<()> {
        self.refresh_kinds();

        if let Some(descriptor) = initial_resource {
            self.open(descriptor);
        }

        loop {
            terminal.draw(|f| {
                let view = match self.router.state().current_page() {
                    Page::Kinds => &mut self.kinds,
                    Page::Resource => &mut self.resource,
                };

                draw(f, self.router.state(), view, self.status.as_deref());
            })?;

            if let Event::Key(ev) = event::read()? {
                if ev.kind != KeyEventKind::Press {
                    continue;
                }

                if self.on_key_event(ev) == EventResult::Quit {
                    return Ok(());
                }
            }
        }
    }

    fn on_key_event(&mut self, ev: KeyEvent) -> EventResult {
        let view = match self.router.state().current_page() {
            Page::Kinds => &mut self.kinds,
            Page::Resource => &mut self.resource,
        };

        let result = self.router.route(ev, view);

        match result {
            EventResult::Ignore => {
                view.on_key_event(ev);
            }
            EventResult::Refresh => self.refresh(),
            EventResult::Select => self.select(),
            EventResult::Nop | EventResult::Quit => {}
        }

        result
    }

    fn refresh(&mut self) {
        match self.router.state().current_page() {
            Page::Kinds => self.refresh_kinds(),
            Page::Resource => {
                if let Some(descriptor) = self.descriptor.clone() {
                    self.open(descriptor);
                }
            }
        }
    }

    fn refresh_kinds(&mut self) {
        let result = self
            .runtime
            .block_on(ResourceKindCatalog::new(self.client).list_kinds())
            .and_then(|kinds| kinds.to_table());

        match result {
            Ok(table) => {
                self.kinds.set_table(table);
                self.status = None;
            }
            Err(err) => self.fail(err),
        }
    }

    fn select(&mut self) {
        if self.router.state().current_page() != Page::Kinds {
            return;
        }

        let Some(kind) = self.kinds.selected_row().and_then(ResourceKind::from_row) else {
            return;
        };

        self.open(kind.descriptor());
    }

    /// On failure the resource page keeps whatever it showed before.
    fn open(&mut self, descriptor: ResourceDescriptor) {
        let result = self
            .runtime
            .block_on(ResourceTableFetcher::new(self.client).fetch_table(&descriptor));

        match result {
            Ok(table) => {
                self.resource.set_title(descriptor.to_string());
                self.resource.set_table(table);
                self.descriptor = Some(descriptor);
                self.status = None;
                self.router.open_page(Page::Resource);
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: Error) {
        logger!(error, "{}", err);

        self.status = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use ratatui::crossterm::event::KeyCode;
    use serde_json::json;

    use crate::{
        kube::{
            apis::{v1_table::Table, APIGroupList, APIResourceList, APIVersions},
            mock::MockTestKubeClient,
        },
        mock_expect,
    };

    use super::*;

    fn discovery(client: &mut MockTestKubeClient) {
        mock_expect!(
            client,
            request,
            [
                (
                    APIVersions,
                    eq("/api"),
                    Ok(serde_json::from_value(json!({
                        "apiVersion": "v1",
                        "kind": "APIVersions",
                        "versions": ["v1"],
                        "serverAddressByClientCIDRs": []
                    }))
                    .unwrap())
                ),
                (
                    APIGroupList,
                    eq("/apis"),
                    Ok(serde_json::from_value(json!({
                        "apiVersion": "v1",
                        "kind": "APIGroupList",
                        "groups": []
                    }))
                    .unwrap())
                ),
                (
                    APIResourceList,
                    eq("/api/v1"),
                    Ok(serde_json::from_value(json!({
                        "apiVersion": "v1",
                        "kind": "APIResourceList",
                        "groupVersion": "v1",
                        "resources": [
                            {
                                "name": "pods",
                                "singularName": "pod",
                                "namespaced": true,
                                "kind": "Pod",
                                "verbs": ["list"]
                            },
                            {
                                "name": "nodes",
                                "singularName": "node",
                                "namespaced": false,
                                "kind": "Node",
                                "verbs": ["list"]
                            }
                        ]
                    }))
                    .unwrap())
                )
            ]
        );
    }

    fn nodes_table() -> Table {
        serde_json::from_value(json!({
            "apiVersion": "meta.k8s.io/v1",
            "kind": "Table",
            "columnDefinitions": [{ "name": "Name" }],
            "rows": [
                {
                    "cells": ["node-a"],
                    "object": { "kind": "Node", "metadata": { "name": "node-a" } }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn select_opens_resource_page() {
        let runtime = Runtime::new().unwrap();
        let mut client = MockTestKubeClient::new();
        discovery(&mut client);
        mock_expect!(
            client,
            table_request,
            Table,
            eq("/api/v1/nodes?includeObject=Object"),
            Ok(nodes_table())
        );

        let mut session = Session::new(&runtime, &client);
        session.refresh_kinds();

        assert_eq!(session.kinds.table().len(), 2);

        // nodes sorts before pods
        assert_eq!(session.on_key_event(KeyCode::Enter.into()), EventResult::Select);

        assert_eq!(session.router.state().current_page(), Page::Resource);
        assert_eq!(session.resource.title(), "nodes/v1");
        assert_eq!(session.resource.table().rows()[0].cells, vec!["node-a"]);
        assert_eq!(session.status, None);
    }

    #[test]
    fn failed_refresh_keeps_previous_table() {
        let runtime = Runtime::new().unwrap();
        let mut client = MockTestKubeClient::new();
        discovery(&mut client);

        let mut calls = 0;
        client
            .expect_table_request::<Table>()
            .with(eq("/api/v1/nodes?includeObject=Object"))
            .returning(move |_| {
                calls += 1;
                if calls > 1 {
                    bail!("connection refused");
                }
                Ok(nodes_table())
            });

        let mut session = Session::new(&runtime, &client);
        session.open(ResourceDescriptor::new("", "", "nodes"));

        assert_eq!(session.resource.table().len(), 1);

        assert_eq!(
            session.on_key_event(KeyCode::Char('r').into()),
            EventResult::Refresh
        );

        assert_eq!(session.resource.table().len(), 1);
        assert!(session
            .status
            .as_deref()
            .is_some_and(|s| s.starts_with("ConnectionError")));
    }
}
