/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Closed element-tag sets.
//!
//! Each record accepts a fixed vocabulary of element names. The name is
//! tokenized once with `from_name`; anything outside the set yields `None`
//! and is reported by the parser as an unknown entry.

/// Declares a closed tag enum with a name tokenizer.
///
/// A trailing `+ Variant(Inner)` clause folds a nested tag set into the
/// enum; names unknown to the outer set are then tried against `Inner`.
macro_rules! element_tags {
    (
        $(#[$meta:meta])*
        $vis:vis enum $tag:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
        $(+ $nested:ident($inner:ty))?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $tag {
            $(
                #[doc = concat!("The `", $text, "` element.")]
                $variant,
            )+
            $(
                /// An element of a nested tag set.
                $nested($inner),
            )?
        }

        impl $tag {
            /// Tokenizes an element name.
            ///
            /// Returns `None` when the name is not part of this set.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                let tag = match name {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                };
                tag $(.or_else(|| <$inner>::from_name(name).map(Self::$nested)))?
            }

            /// Returns the element name as written in configuration.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                    $(Self::$nested(inner) => inner.as_str(),)?
                }
            }
        }

        impl std::fmt::Display for $tag {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

element_tags! {
    /// Top-level configuration groups.
    pub enum GroupTag {
        ConsumerGroup => "ConsumerGroup",
        NiProviderGroup => "NiProviderGroup",
        IProviderGroup => "IProviderGroup",
        ChannelGroup => "ChannelGroup",
        ServerGroup => "ServerGroup",
        LoggerGroup => "LoggerGroup",
        DictionaryGroup => "DictionaryGroup",
        DirectoryGroup => "DirectoryGroup",
        SessionChannelGroup => "SessionChannelGroup",
    }
}

element_tags! {
    /// XML tracing elements shared by every session role.
    pub enum XmlTraceTag {
        ToStdout => "XmlTraceToStdout",
        ToFile => "XmlTraceToFile",
        MaxFileSize => "XmlTraceMaxFileSize",
        FileName => "XmlTraceFileName",
        ToMultipleFiles => "XmlTraceToMultipleFiles",
        Write => "XmlTraceWrite",
        Read => "XmlTraceRead",
        Ping => "XmlTracePing",
    }
}

element_tags! {
    /// Elements of a `Consumer` item.
    pub enum ConsumerTag {
        Channel => "Channel",
        ChannelSet => "ChannelSet",
        Dictionary => "Dictionary",
        Logger => "Logger",
        DictionaryRequestTimeOut => "DictionaryRequestTimeOut",
        DirectoryRequestTimeOut => "DirectoryRequestTimeOut",
        LoginRequestTimeOut => "LoginRequestTimeOut",
        DispatchTimeoutApiThread => "DispatchTimeoutApiThread",
        EnableRtt => "EnableRtt",
        ItemCountHint => "ItemCountHint",
        MaxDispatchCountApiThread => "MaxDispatchCountApiThread",
        MaxDispatchCountUserThread => "MaxDispatchCountUserThread",
        MaxOutstandingPosts => "MaxOutstandingPosts",
        MsgKeyInUpdates => "MsgKeyInUpdates",
        ObeyOpenWindow => "ObeyOpenWindow",
        PostAckTimeout => "PostAckTimeout",
        ReconnectAttemptLimit => "ReconnectAttemptLimit",
        ReconnectMaxDelay => "ReconnectMaxDelay",
        ReconnectMinDelay => "ReconnectMinDelay",
        RequestTimeout => "RequestTimeout",
        ServiceCountHint => "ServiceCountHint",
        RestLogFileName => "RestLogFileName",
        RestRequestTimeOut => "RestRequestTimeOut",
        RestProxyHostName => "RestProxyHostName",
        RestProxyPort => "RestProxyPort",
        RestEnableLog => "RestEnableLog",
        RestEnableLogViaCallback => "RestEnableLogViaCallback",
        SessionEnhancedItemRecovery => "SessionEnhancedItemRecovery",
        SessionChannelSet => "SessionChannelSet",
    }
    + XmlTrace(XmlTraceTag)
}

element_tags! {
    /// Elements of a `NiProvider` item.
    pub enum NiProviderTag {
        Channel => "Channel",
        ChannelSet => "ChannelSet",
        Directory => "Directory",
        DispatchTimeoutApiThread => "DispatchTimeoutApiThread",
        ItemCountHint => "ItemCountHint",
        Logger => "Logger",
        LoginRequestTimeOut => "LoginRequestTimeOut",
        MaxDispatchCountApiThread => "MaxDispatchCountApiThread",
        MaxDispatchCountUserThread => "MaxDispatchCountUserThread",
        MaxEventsInPool => "MaxEventsInPool",
        MergeSourceDirectoryStreams => "MergeSourceDirectoryStreams",
        ReconnectAttemptLimit => "ReconnectAttemptLimit",
        ReconnectMaxDelay => "ReconnectMaxDelay",
        ReconnectMinDelay => "ReconnectMinDelay",
        RecoverUserSubmitSourceDirectory => "RecoverUserSubmitSourceDirectory",
        RefreshFirstRequired => "RefreshFirstRequired",
        RemoveItemsOnDisconnect => "RemoveItemsOnDisconnect",
        RequestTimeout => "RequestTimeout",
        ServiceCountHint => "ServiceCountHint",
    }
    + XmlTrace(XmlTraceTag)
}

element_tags! {
    /// Elements of an `IProvider` item.
    pub enum IProviderTag {
        Server => "Server",
        Directory => "Directory",
        DispatchTimeoutApiThread => "DispatchTimeoutApiThread",
        ItemCountHint => "ItemCountHint",
        Logger => "Logger",
        MaxDispatchCountApiThread => "MaxDispatchCountApiThread",
        MaxDispatchCountUserThread => "MaxDispatchCountUserThread",
        MaxEventsInPool => "MaxEventsInPool",
        RefreshFirstRequired => "RefreshFirstRequired",
        RequestTimeout => "RequestTimeout",
        ServiceCountHint => "ServiceCountHint",
        AcceptDirMessageWithoutMinFilters => "AcceptDirMessageWithoutMinFilters",
        AcceptMessageSameKeyButDiffStream => "AcceptMessageSameKeyButDiffStream",
        AcceptMessageThatChangesService => "AcceptMessageThatChangesService",
        AcceptMessageWithoutAcceptingRequests => "AcceptMessageWithoutAcceptingRequests",
        AcceptMessageWithoutBeingLogin => "AcceptMessageWithoutBeingLogin",
        AcceptMessageWithoutQosInRange => "AcceptMessageWithoutQosInRange",
        EnforceAckIdValidation => "EnforceAckIDValidation",
        EnumTypeFragmentSize => "EnumTypeFragmentSize",
        FieldDictionaryFragmentSize => "FieldDictionaryFragmentSize",
    }
    + XmlTrace(XmlTraceTag)
}

element_tags! {
    /// Elements of a `Channel` item.
    pub enum ChannelTag {
        ChannelType => "ChannelType",
        EncryptedProtocolType => "EncryptedProtocolType",
        ConnectionPingTimeout => "ConnectionPingTimeout",
        EnableSessionManagement => "EnableSessionManagement",
        GuaranteedOutputBuffers => "GuaranteedOutputBuffers",
        HighWaterMark => "HighWaterMark",
        InterfaceName => "InterfaceName",
        Location => "Location",
        NumInputBuffers => "NumInputBuffers",
        ServiceDiscoveryRetryCount => "ServiceDiscoveryRetryCount",
        SysRecvBufSize => "SysRecvBufSize",
        SysSendBufSize => "SysSendBufSize",
        CompressionThreshold => "CompressionThreshold",
        CompressionType => "CompressionType",
        Host => "Host",
        Port => "Port",
        ProxyHost => "ProxyHost",
        ProxyPort => "ProxyPort",
        TcpNodelay => "TcpNodelay",
        DirectWrite => "DirectWrite",
        AuthenticationTimeout => "AuthenticationTimeout",
        InitializationTimeout => "InitializationTimeout",
        SecurityProtocol => "SecurityProtocol",
    }
}

element_tags! {
    /// Elements of a `Server` item.
    pub enum ServerTag {
        ServerType => "ServerType",
        ConnectionMinPingTimeout => "ConnectionMinPingTimeout",
        ConnectionPingTimeout => "ConnectionPingTimeout",
        CompressionThreshold => "CompressionThreshold",
        CompressionType => "CompressionType",
        DirectWrite => "DirectWrite",
        GuaranteedOutputBuffers => "GuaranteedOutputBuffers",
        HighWaterMark => "HighWaterMark",
        InitializationTimeout => "InitializationTimeout",
        AuthenticationTimeout => "AuthenticationTimeout",
        InterfaceName => "InterfaceName",
        MaxFragmentSize => "MaxFragmentSize",
        NumInputBuffers => "NumInputBuffers",
        Port => "Port",
        SysRecvBufSize => "SysRecvBufSize",
        SysSendBufSize => "SysSendBufSize",
        TcpNodelay => "TcpNodelay",
        ServerCert => "ServerCert",
        ServerPrivateKey => "ServerPrivateKey",
        SecurityProtocol => "SecurityProtocol",
        CipherSuite => "CipherSuite",
    }
}

element_tags! {
    /// Elements of a `Logger` item.
    pub enum LoggerTag {
        FileName => "FileName",
        IncludeDateInLoggerOutput => "IncludeDateInLoggerOutput",
        NumberOfLogFiles => "NumberOfLogFiles",
        MaxLogFileSize => "MaxLogFileSize",
        LoggerSeverity => "LoggerSeverity",
        LoggerType => "LoggerType",
    }
}

element_tags! {
    /// Elements of a `Dictionary` item.
    pub enum DictionaryTag {
        DictionaryType => "DictionaryType",
        EnumTypeDefFileName => "EnumTypeDefFileName",
        EnumTypeDefItemName => "EnumTypeDefItemName",
        RdmFieldDictionaryFileName => "RdmFieldDictionaryFileName",
        RdmFieldDictionaryItemName => "RdmFieldDictionaryItemName",
    }
}

element_tags! {
    /// Elements of a `SessionChannelInfo` item.
    pub enum SessionChannelTag {
        Channel => "Channel",
        ChannelSet => "ChannelSet",
        ReconnectAttemptLimit => "ReconnectAttemptLimit",
        ReconnectMaxDelay => "ReconnectMaxDelay",
        ReconnectMinDelay => "ReconnectMinDelay",
    }
}

element_tags! {
    /// Scalar elements of a service `InfoFilter`.
    pub enum InfoFilterTag {
        ServiceId => "ServiceId",
        Vendor => "Vendor",
        IsSource => "IsSource",
        AcceptingConsumerStatus => "AcceptingConsumerStatus",
        ItemList => "ItemList",
        SupportsQosRange => "SupportsQoSRange",
        SupportsOutOfBandSnapshots => "SupportsOutOfBandSnapshots",
    }
}

element_tags! {
    /// Scalar elements of a service `StateFilter`.
    pub enum StateFilterTag {
        ServiceState => "ServiceState",
        AcceptingRequests => "AcceptingRequests",
    }
}

element_tags! {
    /// Elements of a service `Status`.
    pub enum StatusTag {
        StreamState => "StreamState",
        DataState => "DataState",
        StatusCode => "StatusCode",
        StatusText => "StatusText",
    }
}

element_tags! {
    /// Elements of a service `LoadFilter`.
    pub enum LoadFilterTag {
        OpenLimit => "OpenLimit",
        OpenWindow => "OpenWindow",
        LoadFactor => "LoadFactor",
    }
}
