pub mod request;
pub mod response;

pub use request::{
    ClientInfo, CreateCommentParams, DeleteBlobParams, DeleteCommentParams, DocumentParams,
    InitializeParams, JsonRpcRequest, ListCommentsParams, ListDocumentsParams, ListHistoryParams,
    PublishParams, ReadResourceParams, ResolveCommentParams, RpcId, SearchParams, ToolCallParams,
    UpdateCommentParams, WorkspaceParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
